use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use robotai_site::imagegen::{self, default_jobs, load_jobs, JobOutcome};
use robotai_site::page::{resolve_active, SectionLabel, StaticPage};
use robotai_site::{GeneratorConfig, DEFAULT_ANCHOR_OFFSET};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "robotai-site",
    version,
    about = "Asset generation and scroll tracking helpers for the Robot AI Tech site"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the page images with the remote image model
    Generate(GenerateArgs),
    /// Print the active section for a scroll offset on the default page layout
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Directory the images are written to
    #[arg(long, default_value = "images")]
    output_dir: PathBuf,
    /// Model identifier
    #[arg(long)]
    model: Option<String>,
    /// Base URL of the generation service
    #[arg(long)]
    endpoint: Option<String>,
    /// JSON file with [{"prompt", "filename"}] entries replacing the built-in jobs
    #[arg(long)]
    jobs: Option<PathBuf>,
    /// Per-request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Print the jobs and exit without calling the service
    #[arg(long)]
    list: bool,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Vertical scroll offset of the viewport
    #[arg(long, allow_negative_numbers = true)]
    scroll_y: f64,
    /// Sticky header height added to the scroll offset
    #[arg(long, default_value_t = DEFAULT_ANCHOR_OFFSET)]
    anchor: f64,
    /// Section that was active before this scroll event
    #[arg(long, default_value = "HOME")]
    previous: SectionLabel,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("ROBOTAI_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(args: GenerateArgs) -> Result<()> {
    let jobs = match &args.jobs {
        Some(path) => load_jobs(path).with_context(|| format!("loading jobs from {}", path.display()))?,
        None => default_jobs(),
    };

    if args.list {
        for job in &jobs {
            println!("{}\t{}", job.filename, job.prompt);
        }
        return Ok(());
    }

    let defaults = GeneratorConfig::default();
    let config = GeneratorConfig {
        model: args.model.unwrap_or(defaults.model),
        endpoint: args.endpoint.unwrap_or(defaults.endpoint),
        output_dir: args.output_dir,
        timeout_ms: args.timeout_ms.unwrap_or(defaults.timeout_ms),
        user_agent: defaults.user_agent,
    };

    let outcomes = imagegen::generate_images(&config, |name| std::env::var(name).ok(), &jobs)?;
    let saved = outcomes.iter().filter(|o| o.is_saved()).count();
    log::info!("{} saved, {} failed", saved, outcomes.len() - saved);
    for outcome in &outcomes {
        if let JobOutcome::Saved { filename, sha256, .. } = outcome {
            log::debug!("{} sha256={}", filename, sha256);
        }
    }
    Ok(())
}

fn resolve(args: ResolveArgs) {
    let page = StaticPage::default();
    let label = resolve_active(args.scroll_y, args.anchor, &page.bounds(), args.previous);
    println!("{}", label);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let res = match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Resolve(args) => {
            resolve(args);
            Ok(())
        }
    };

    if let Err(e) = res {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

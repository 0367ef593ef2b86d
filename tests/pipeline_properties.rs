use base64::Engine as Base64Engine;
use robotai_site::imagegen::{
    generate_images_with, GenerateResponse, ImageBackend, ImageJob, JobOutcome, Part, Pipeline,
};
use robotai_site::{Error, GeneratorConfig, Result};
use std::cell::Cell;
use std::collections::VecDeque;
use std::fs;

/// Replays canned responses in order and records the prompts it was given.
struct Scripted {
    responses: VecDeque<Result<GenerateResponse>>,
    prompts: Vec<String>,
}

impl Scripted {
    fn new(responses: Vec<Result<GenerateResponse>>) -> Self {
        Self {
            responses: responses.into(),
            prompts: Vec::new(),
        }
    }
}

impl ImageBackend for Scripted {
    fn generate(&mut self, prompt: &str) -> Result<GenerateResponse> {
        self.prompts.push(prompt.to_string());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("script exhausted".into())))
    }
}

fn image(bytes: &[u8]) -> GenerateResponse {
    GenerateResponse::from_parts(vec![
        Part::text("Here you go"),
        Part::inline("image/png", base64::engine::general_purpose::STANDARD.encode(bytes)),
    ])
}

fn config_in(dir: &std::path::Path) -> GeneratorConfig {
    GeneratorConfig {
        output_dir: dir.join("images"),
        ..Default::default()
    }
}

#[test]
fn missing_image_part_fails_only_that_job() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("images");
    let backend = Scripted::new(vec![
        Ok(image(b"\x89PNG first")),
        Ok(GenerateResponse::from_parts(vec![Part::text("I cannot draw that")])),
    ]);
    let mut pipeline = Pipeline::new(backend, &out);
    let outcomes = pipeline
        .run(&[
            ImageJob::new("a robot", "one.png"),
            ImageJob::new("a drone", "two.png"),
        ])
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_saved());
    assert_eq!(outcomes[1].filename(), "two.png");
    assert!(matches!(outcomes[1].error(), Some(Error::NoImageData)));

    let files: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(files.len(), 1);
    assert_eq!(fs::read(out.join("one.png")).unwrap(), b"\x89PNG first");
}

#[test]
fn missing_credential_aborts_before_any_side_effect() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let connects = Cell::new(0);

    let err = generate_images_with(
        &config,
        |_| None,
        &[ImageJob::new("a robot", "one.png")],
        |_, _| {
            connects.set(connects.get() + 1);
            Ok(Scripted::new(Vec::new()))
        },
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingCredential { .. }));
    assert_eq!(connects.get(), 0);
    assert!(!config.output_dir.exists());
}

#[test]
fn fallback_credential_reaches_the_backend() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());

    let outcomes = generate_images_with(
        &config,
        |name| (name == "API_KEY").then(|| "fallback-key".to_string()),
        &[ImageJob::new("a robot", "one.png")],
        |cfg, cred| {
            assert_eq!(cred.key(), "fallback-key");
            assert_eq!(cfg.model, "gemini-2.5-flash-image");
            Ok(Scripted::new(vec![Ok(image(b"abc"))]))
        },
    )
    .unwrap();

    assert!(outcomes[0].is_saved());
    assert!(config.output_dir.join("one.png").is_file());
}

#[test]
fn rerun_overwrites_existing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("images");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("logo.png"), b"stale contents that are longer").unwrap();

    let job = [ImageJob::new("a logo", "logo.png")];
    let first = Pipeline::new(Scripted::new(vec![Ok(image(b"fresh"))]), &out)
        .run(&job)
        .unwrap();
    assert_eq!(fs::read(out.join("logo.png")).unwrap(), b"fresh");

    let second = Pipeline::new(Scripted::new(vec![Ok(image(b"fresh"))]), &out)
        .run(&job)
        .unwrap();
    assert_eq!(fs::read(out.join("logo.png")).unwrap(), b"fresh");

    match (&first[0], &second[0]) {
        (JobOutcome::Saved { sha256: a, .. }, JobOutcome::Saved { sha256: b, .. }) => assert_eq!(a, b),
        other => panic!("unexpected outcomes: {:?}", other),
    }
}

#[test]
fn same_prompt_different_filenames_are_independent() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("images");
    let backend = Scripted::new(vec![Ok(image(b"first")), Ok(image(b"second"))]);
    let mut pipeline = Pipeline::new(backend, &out);
    let outcomes = pipeline
        .run(&[
            ImageJob::new("the same prompt", "a.jpg"),
            ImageJob::new("the same prompt", "b.jpg"),
        ])
        .unwrap();

    assert!(outcomes.iter().all(JobOutcome::is_saved));
    assert_eq!(fs::read(out.join("a.jpg")).unwrap(), b"first");
    assert_eq!(fs::read(out.join("b.jpg")).unwrap(), b"second");
    assert_eq!(
        pipeline.into_backend().prompts,
        vec!["the same prompt", "the same prompt"]
    );
}

#[test]
fn service_errors_are_recorded_and_batch_continues() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("images");
    let backend = Scripted::new(vec![
        Err(Error::Service {
            status: 500,
            body: "internal".into(),
        }),
        Err(Error::NetworkError("timed out".into())),
        Ok(image(b"third")),
    ]);
    let outcomes = Pipeline::new(backend, &out)
        .run(&[
            ImageJob::new("p1", "1.png"),
            ImageJob::new("p2", "2.png"),
            ImageJob::new("p3", "3.png"),
        ])
        .unwrap();

    let names: Vec<_> = outcomes.iter().map(JobOutcome::filename).collect();
    assert_eq!(names, vec!["1.png", "2.png", "3.png"]);
    assert!(matches!(outcomes[0].error(), Some(Error::Service { status: 500, .. })));
    assert!(matches!(outcomes[1].error(), Some(Error::NetworkError(_))));
    assert!(outcomes[2].is_saved());
}

#[test]
fn invalid_job_fails_without_aborting_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let outcomes = generate_images_with(
        &config,
        |_| Some("key".to_string()),
        &[
            ImageJob::new("a robot", "../outside.png"),
            ImageJob::new("a drone", "drone.jpg"),
        ],
        |_, _| Ok(Scripted::new(vec![Ok(image(b"drone"))])),
    )
    .unwrap();

    assert!(matches!(outcomes[0].error(), Some(Error::ConfigError(_))));
    assert!(outcomes[1].is_saved());
    assert!(!tmp.path().join("outside.png").exists());
    assert_eq!(fs::read(config.output_dir.join("drone.jpg")).unwrap(), b"drone");
}

#[test]
fn jobs_file_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("jobs.json");
    fs::write(
        &path,
        r#"[{"prompt": "a drone", "filename": "drone.jpg"}, {"prompt": "a robot", "filename": "robot.jpg"}]"#,
    )
    .unwrap();
    let jobs = robotai_site::imagegen::load_jobs(&path).unwrap();
    assert_eq!(jobs[1], ImageJob::new("a robot", "robot.jpg"));

    // entries are checked per job by the pipeline, not by the loader
    fs::write(&path, r#"[{"prompt": "a logo", "filename": " logo.png"}]"#).unwrap();
    let jobs = robotai_site::imagegen::load_jobs(&path).unwrap();
    assert!(jobs[0].validate().is_err());

    fs::write(&path, r#"{"prompt": "not a list"}"#).unwrap();
    assert!(matches!(
        robotai_site::imagegen::load_jobs(&path),
        Err(Error::ConfigError(_))
    ));
}

//! Async-friendly wrapper around the blocking pipeline.
//!
//! The pipeline does blocking HTTP, so it is moved onto a dedicated worker
//! thread and its result handed back over a oneshot channel. Jobs still run
//! strictly one after another on that thread.

use crate::imagegen::{ImageBackend, ImageJob, JobOutcome, Pipeline};
use crate::{Error, Result};
use std::path::PathBuf;
use std::thread;
use tokio::sync::oneshot;

/// Run `jobs` on a worker thread and await the outcomes.
pub async fn run_pipeline<B>(
    backend: B,
    output_dir: impl Into<PathBuf>,
    jobs: Vec<ImageJob>,
) -> Result<Vec<JobOutcome>>
where
    B: ImageBackend + Send + 'static,
{
    let output_dir = output_dir.into();
    on_worker(move || Pipeline::new(backend, output_dir).run(&jobs)).await
}

/// Resolve the credential from the environment and run `jobs` against the
/// Gemini backend without blocking the async runtime.
///
/// The HTTP client is built and dropped on the worker thread, since the
/// blocking client must stay out of the async context.
#[cfg(feature = "gemini")]
pub async fn generate_images(
    config: crate::GeneratorConfig,
    jobs: Vec<ImageJob>,
) -> Result<Vec<JobOutcome>> {
    let credential = crate::imagegen::Credential::from_env()?;
    on_worker(move || {
        let backend = crate::imagegen::GeminiClient::new(&config, credential)?;
        Pipeline::new(backend, &config.output_dir).run(&jobs)
    })
    .await
}

async fn on_worker<F>(work: F) -> Result<Vec<JobOutcome>>
where
    F: FnOnce() -> Result<Vec<JobOutcome>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    thread::Builder::new()
        .name("imagegen-worker".to_string())
        .spawn(move || {
            // Receiver may have been dropped; nothing to report then
            let _ = tx.send(work());
        })?;

    rx.await
        .map_err(|e| Error::Other(format!("Pipeline worker canceled: {}", e)))?
}

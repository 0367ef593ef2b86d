//! Sequential job runner

use super::{duplicate_filenames, ImageBackend, ImageJob};
use crate::{Error, Result};
use base64::Engine as Base64Engine;
use log::{error, info, warn};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one job.
#[derive(Debug)]
pub enum JobOutcome {
    /// The decoded image was written to `path`
    Saved {
        filename: String,
        path: PathBuf,
        bytes: usize,
        /// Hex SHA-256 of the written bytes
        sha256: String,
    },
    /// Nothing was written for this job
    Failed { filename: String, error: Error },
}

impl JobOutcome {
    pub fn filename(&self) -> &str {
        match self {
            JobOutcome::Saved { filename, .. } | JobOutcome::Failed { filename, .. } => filename,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, JobOutcome::Saved { .. })
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            JobOutcome::Failed { error, .. } => Some(error),
            JobOutcome::Saved { .. } => None,
        }
    }
}

/// Runs jobs one at a time against a backend, writing into `output_dir`.
pub struct Pipeline<B> {
    backend: B,
    output_dir: PathBuf,
}

impl<B: ImageBackend> Pipeline<B> {
    pub fn new(backend: B, output_dir: impl AsRef<Path>) -> Self {
        Self {
            backend,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Create the output directory, then attempt every job in order.
    ///
    /// Only a failure to create the directory is returned as `Err`; per-job
    /// failures, including jobs rejected by [`ImageJob::validate`] before
    /// any request is made, are logged and recorded in the returned
    /// outcomes, which are in job order.
    pub fn run(&mut self, jobs: &[ImageJob]) -> Result<Vec<JobOutcome>> {
        fs::create_dir_all(&self.output_dir)?;

        for name in duplicate_filenames(jobs) {
            warn!("filename {} appears more than once; later jobs overwrite it", name);
        }

        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in jobs {
            outcomes.push(self.run_job(job));
        }
        Ok(outcomes)
    }

    fn run_job(&mut self, job: &ImageJob) -> JobOutcome {
        info!("Generating {}...", job.filename);
        match self.generate_and_save(job) {
            Ok((path, data)) => {
                info!("Saved {} to {}", job.filename, path.display());
                JobOutcome::Saved {
                    filename: job.filename.clone(),
                    path,
                    bytes: data.len(),
                    sha256: hex::encode(Sha256::digest(&data)),
                }
            }
            Err(err) => {
                match err {
                    Error::NoImageData => error!("No image data found for {}", job.filename),
                    ref other => error!("Error generating {}: {}", job.filename, other),
                }
                JobOutcome::Failed {
                    filename: job.filename.clone(),
                    error: err,
                }
            }
        }
    }

    fn generate_and_save(&mut self, job: &ImageJob) -> Result<(PathBuf, Vec<u8>)> {
        job.validate()?;
        let response = self.backend.generate(&job.prompt)?;
        let inline = response.first_inline_data().ok_or(Error::NoImageData)?;
        let data = base64::engine::general_purpose::STANDARD.decode(inline.data.trim())?;
        let path = self.output_dir.join(&job.filename);
        fs::write(&path, &data)?;
        Ok((path, data))
    }
}

//! Offline image generation for the page assets
//!
//! Each [`ImageJob`] is sent to a text-to-image backend, the first inline
//! image part of the response is base64-decoded and written to
//! `<output_dir>/<filename>`. Jobs run one after another; a failing job is
//! reported in its [`JobOutcome`] and never stops the batch.
//!
//! ```no_run
//! use robotai_site::imagegen::{default_jobs, generate_images, JobOutcome};
//! use robotai_site::GeneratorConfig;
//!
//! # fn main() -> robotai_site::Result<()> {
//! let outcomes = generate_images(
//!     &GeneratorConfig::default(),
//!     |name| std::env::var(name).ok(),
//!     &default_jobs(),
//! )?;
//! let saved = outcomes.iter().filter(|o| o.is_saved()).count();
//! println!("{} saved", saved);
//! # Ok(())
//! # }
//! ```

pub mod jobs;
pub mod pipeline;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use jobs::{default_jobs, duplicate_filenames, load_jobs, ImageJob};
pub use pipeline::{JobOutcome, Pipeline};

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;

use crate::{Error, GeneratorConfig, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Checked first for the API key
pub const PRIMARY_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Checked only when the primary variable is unset or empty
pub const FALLBACK_API_KEY_VAR: &str = "API_KEY";

/// API key for the generation service, plus the variable it came from.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    source: &'static str,
    key: String,
}

impl Credential {
    pub fn new(source: &'static str, key: impl Into<String>) -> Self {
        Self {
            source,
            key: key.into(),
        }
    }

    /// Look the key up through `lookup`, primary variable first.
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        [PRIMARY_API_KEY_VAR, FALLBACK_API_KEY_VAR]
            .into_iter()
            .find_map(|var| {
                lookup(var)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .map(|key| Credential::new(var, key))
            })
            .ok_or(Error::MissingCredential {
                primary: PRIMARY_API_KEY_VAR,
                fallback: FALLBACK_API_KEY_VAR,
            })
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Name of the variable the key was read from
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Response of a `generateContent` call, reduced to what the pipeline reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One content fragment; either text, inline binary data, or neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64 payload embedded in a response part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

impl GenerateResponse {
    /// Single-candidate response holding `parts`
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts,
                }),
            }],
        }
    }

    /// First part of the first candidate that carries inline data.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }
}

/// A text-to-image service.
pub trait ImageBackend {
    /// Submit one prompt and return the raw response.
    fn generate(&mut self, prompt: &str) -> Result<GenerateResponse>;
}

impl<B: ImageBackend + ?Sized> ImageBackend for Box<B> {
    fn generate(&mut self, prompt: &str) -> Result<GenerateResponse> {
        (**self).generate(prompt)
    }
}

/// Resolve the credential, connect a backend and run every job.
///
/// A missing credential is returned as an error before `connect` is called
/// and before the output directory is touched.
pub fn generate_images_with<F, C, B>(
    config: &GeneratorConfig,
    lookup: F,
    jobs: &[ImageJob],
    connect: C,
) -> Result<Vec<JobOutcome>>
where
    F: Fn(&str) -> Option<String>,
    C: FnOnce(&GeneratorConfig, Credential) -> Result<B>,
    B: ImageBackend,
{
    let credential = Credential::resolve(lookup)?;
    log::debug!("using API key from {}", credential.source());
    let backend = connect(config, credential)?;
    Pipeline::new(backend, &config.output_dir).run(jobs)
}

/// [`generate_images_with`] using the Gemini HTTP backend.
#[cfg(feature = "gemini")]
pub fn generate_images<F>(
    config: &GeneratorConfig,
    lookup: F,
    jobs: &[ImageJob],
) -> Result<Vec<JobOutcome>>
where
    F: Fn(&str) -> Option<String>,
{
    generate_images_with(config, lookup, jobs, GeminiClient::new)
}

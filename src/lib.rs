//! Robot AI Tech site support crate
//!
//! Two independent pieces back the marketing page:
//!
//! - [`page`]: maps the viewport scroll offset to the single active
//!   navigation section and handles "jump to section" requests.
//! - [`imagegen`]: an offline batch that asks a generative-image service for
//!   each page asset and writes the decoded bytes under `images/`.
//!
//! # Example
//!
//! ```
//! use robotai_site::page::{PageSurface, SectionLabel, SectionTracker, StaticPage};
//!
//! let mut page = StaticPage::default();
//! let mut tracker = SectionTracker::default();
//!
//! let robot = page.measure(SectionLabel::Robot).unwrap();
//! page.set_scroll_y(robot.top_offset);
//! assert_eq!(tracker.on_scroll(&page), SectionLabel::Robot);
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod page;

pub mod imagegen;

// Async-friendly pipeline API (worker-thread backed)
pub mod async_api;

use std::path::PathBuf;

/// Height of the sticky header; the probe point sits this far below the
/// top of the viewport.
pub const DEFAULT_ANCHOR_OFFSET: f64 = 100.0;

/// Configuration for the section tracker
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Added to the scroll offset before testing section intervals
    pub anchor_offset: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
        }
    }
}

/// Configuration for the image generation batch
///
/// ```
/// let cfg = robotai_site::GeneratorConfig::default();
/// assert_eq!(cfg.model, "gemini-2.5-flash-image");
/// assert!(cfg.output_dir.ends_with("images"));
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Base URL of the generation service
    pub endpoint: String,
    /// Directory the decoded images are written to
    pub output_dir: PathBuf,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// User agent string to send with requests
    pub user_agent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-image".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            output_dir: PathBuf::from("images"),
            timeout_ms: 120_000,
            user_agent: concat!("robotai-site/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

//! Image job definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One image to produce: a prompt and the file it is saved as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageJob {
    pub prompt: String,
    pub filename: String,
}

impl ImageJob {
    pub fn new(prompt: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            filename: filename.into(),
        }
    }

    /// Check that the job can be run as written.
    ///
    /// The prompt must not be blank. The filename is used verbatim, so it
    /// must be a plain file name: non-empty, no surrounding whitespace, no
    /// control characters, no path separators and not `.` or `..`.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::ConfigError(format!("{:?} has an empty prompt", self.filename)));
        }
        let name = self.filename.as_str();
        if name.is_empty() {
            return Err(Error::ConfigError("empty filename".into()));
        }
        if name.trim() != name || name.chars().any(char::is_control) {
            return Err(Error::ConfigError(format!(
                "filename {:?} has surrounding whitespace or control characters",
                name
            )));
        }
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(Error::ConfigError(format!("filename {:?} must be a plain file name", name)));
        }
        Ok(())
    }
}

/// Assets referenced by the page: the logo, the lab shot and one image per product.
pub fn default_jobs() -> Vec<ImageJob> {
    const JOBS: [(&str, &str); 8] = [
        (
            "A minimalist, futuristic tech company logo for 'Robot AI Tech'. Clean lines, blue and emerald green gradients, white background, high resolution, vector style.",
            "logo.png",
        ),
        (
            "A high-tech robotics R&D laboratory with blue ambient lighting, advanced computer screens, and robotic prototypes on workbenches. Cinematic lighting, 8k resolution.",
            "about_lab.jpg",
        ),
        (
            "A sleek, advanced humanoid robot named ARES-1 standing in a futuristic industrial setting. White and carbon fiber finish, glowing blue sensors, 8k resolution.",
            "robot_ares.jpg",
        ),
        (
            "A rugged, high-tech quadruped robot named SENTINEL walking through a rocky, rubble-filled terrain. Military grade finish, LIDAR sensors, cinematic lighting.",
            "robot_sentinel.jpg",
        ),
        (
            "A high-precision collaborative robotic arm named CO-BOT 7 working in a clean, modern laboratory environment. 7-axis joints, sleek silver finish.",
            "robot_cobot.jpg",
        ),
        (
            "A high-speed autonomous drone named SKY-HUNTER X flying through a futuristic city skyline at dusk. Sleek aerodynamic design, glowing lights.",
            "drone_skyhunter.jpg",
        ),
        (
            "A large, powerful heavy-lift industrial drone named TITAN carrying a cargo container over a construction site. Eight rotors, rugged design.",
            "drone_titan.jpg",
        ),
        (
            "A sleek fixed-wing UAV named ORBITER 3 soaring high above a lush forest. White wings, solar panels on top, high-altitude surveillance style.",
            "drone_orbiter.jpg",
        ),
    ];
    JOBS.iter()
        .map(|&(prompt, filename)| ImageJob::new(prompt, filename))
        .collect()
}

/// Filenames used by more than one job, in first-repeat order.
///
/// Such jobs are still run; the later one overwrites the earlier file.
pub fn duplicate_filenames(jobs: &[ImageJob]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut dups = Vec::new();
    for job in jobs {
        let name = job.filename.as_str();
        if !seen.insert(name) && !dups.contains(&name) {
            dups.push(name);
        }
    }
    dups
}

/// Read a JSON array of `{"prompt", "filename"}` objects.
///
/// Only the file itself is checked here; each entry is validated when the
/// pipeline reaches it.
pub fn load_jobs(path: &Path) -> Result<Vec<ImageJob>> {
    let data = std::fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|e| Error::ConfigError(format!("invalid jobs file {}: {}", path.display(), e)))
}

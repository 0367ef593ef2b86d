//! Page sections and scroll-linked navigation state
//!
//! The page is a fixed vertical sequence of sections. The presentation layer
//! owns the real geometry; this module only sees it through [`PageSurface`]
//! and turns scroll offsets into a single active [`SectionLabel`].

pub mod layout;
pub mod tracker;

pub use layout::StaticPage;
pub use tracker::{resolve_active, SectionTracker};

use std::fmt;
use std::str::FromStr;

/// A navigable region of the page, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionLabel {
    Home,
    About,
    Robot,
    Drone,
    Contact,
}

impl SectionLabel {
    /// Every section in declared page order
    pub const ALL: [SectionLabel; 5] = [
        SectionLabel::Home,
        SectionLabel::About,
        SectionLabel::Robot,
        SectionLabel::Drone,
        SectionLabel::Contact,
    ];

    /// Upper-case name shown in the navigation bar
    pub fn name(self) -> &'static str {
        match self {
            SectionLabel::Home => "HOME",
            SectionLabel::About => "ABOUT",
            SectionLabel::Robot => "ROBOT",
            SectionLabel::Drone => "DRONE",
            SectionLabel::Contact => "CONTACT",
        }
    }

    /// Element id the section is mounted under
    pub fn element_id(self) -> &'static str {
        match self {
            SectionLabel::Home => "home",
            SectionLabel::About => "about",
            SectionLabel::Robot => "robot",
            SectionLabel::Drone => "drone",
            SectionLabel::Contact => "contact",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section: {}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionLabel {
    type Err = UnknownSection;

    /// Accepts either the navigation name or the element id, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        SectionLabel::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Measured vertical extent of one section at read time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub label: SectionLabel,
    pub top_offset: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(label: SectionLabel, top_offset: f64, height: f64) -> Self {
        Self {
            label,
            top_offset,
            height,
        }
    }

    /// Half-open containment: the top edge belongs to this section, the
    /// bottom edge to whatever starts there.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top_offset && y < self.top_offset + self.height
    }
}

/// What the tracker needs from the rendering layer.
///
/// Geometry may reflow between calls, so implementations must measure on
/// every call rather than hand back a cached value.
pub trait PageSurface {
    /// Current vertical scroll offset of the viewport
    fn scroll_y(&self) -> f64;

    /// Measure a section, or `None` if it is not mounted
    fn measure(&self, label: SectionLabel) -> Option<SectionBounds>;

    /// Bring the top of the section into view
    fn scroll_into_view(&mut self, label: SectionLabel);
}

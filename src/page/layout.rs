//! Stacked block layout for the page sections
//!
//! `StaticPage` is an in-memory `PageSurface`: sections are laid out top to
//! bottom with no gaps unless a spacer is inserted, and scrolling just moves
//! a stored offset. Sections can be unmounted to mimic a partially rendered
//! page.

use super::{PageSurface, SectionBounds, SectionLabel};

/// Default section heights for the marketing page at a 1280x720 viewport.
pub const DEFAULT_HEIGHTS: [(SectionLabel, f64); 5] = [
    (SectionLabel::Home, 720.0),
    (SectionLabel::About, 900.0),
    (SectionLabel::Robot, 1100.0),
    (SectionLabel::Drone, 1100.0),
    (SectionLabel::Contact, 800.0),
];

#[derive(Debug, Clone, PartialEq)]
struct Block {
    bounds: SectionBounds,
    mounted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticPage {
    blocks: Vec<Block>,
    scroll_y: f64,
    /// Extra space below the last section (footer)
    tail: f64,
}

impl StaticPage {
    /// Stack sections vertically starting at y = 0.
    pub fn stacked(heights: &[(SectionLabel, f64)]) -> Self {
        let mut y = 0.0;
        let mut blocks = Vec::with_capacity(heights.len());
        for &(label, height) in heights {
            let height = height.max(0.0);
            blocks.push(Block {
                bounds: SectionBounds::new(label, y, height),
                mounted: true,
            });
            y += height;
        }
        Self {
            blocks,
            scroll_y: 0.0,
            tail: 0.0,
        }
    }

    /// Add vertical space before `label`, pushing it and everything after it down.
    pub fn with_gap_before(mut self, label: SectionLabel, gap: f64) -> Self {
        let mut shifting = false;
        for block in &mut self.blocks {
            if block.bounds.label == label {
                shifting = true;
            }
            if shifting {
                block.bounds.top_offset += gap;
            }
        }
        self
    }

    /// Add a footer of the given height below the last section.
    pub fn with_footer(mut self, height: f64) -> Self {
        self.tail = height.max(0.0);
        self
    }

    /// Mark a section as not rendered; `measure` returns `None` for it.
    pub fn unmount(&mut self, label: SectionLabel) {
        if let Some(block) = self.blocks.iter_mut().find(|b| b.bounds.label == label) {
            block.mounted = false;
        }
    }

    /// Change a section's height and reflow everything below it.
    pub fn resize(&mut self, label: SectionLabel, height: f64) {
        let mut delta = 0.0;
        for block in &mut self.blocks {
            block.bounds.top_offset += delta;
            if block.bounds.label == label {
                let height = height.max(0.0);
                delta = height - block.bounds.height;
                block.bounds.height = height;
            }
        }
    }

    /// Total scrollable height including the footer.
    pub fn document_height(&self) -> f64 {
        self.blocks
            .iter()
            .map(|b| b.bounds.top_offset + b.bounds.height)
            .fold(0.0, f64::max)
            + self.tail
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Every mounted section's bounds in page order.
    pub fn bounds(&self) -> Vec<SectionBounds> {
        self.blocks
            .iter()
            .filter(|b| b.mounted)
            .map(|b| b.bounds)
            .collect()
    }
}

impl Default for StaticPage {
    fn default() -> Self {
        StaticPage::stacked(&DEFAULT_HEIGHTS).with_footer(320.0)
    }
}

impl PageSurface for StaticPage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn measure(&self, label: SectionLabel) -> Option<SectionBounds> {
        self.blocks
            .iter()
            .find(|b| b.mounted && b.bounds.label == label)
            .map(|b| b.bounds)
    }

    fn scroll_into_view(&mut self, label: SectionLabel) {
        if let Some(bounds) = self.measure(label) {
            self.scroll_y = bounds.top_offset;
        }
    }
}

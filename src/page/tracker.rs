//! Scroll position to active section resolution

use super::{PageSurface, SectionBounds, SectionLabel};
use crate::TrackerConfig;
use log::{debug, warn};

/// Pick the active section for a scroll offset.
///
/// The probe point is `scroll_y + anchor_offset`. Sections are scanned in the
/// given order and the first one whose `[top, top + height)` interval holds
/// the probe wins. When nothing matches (a gap, above the first section,
/// past the last one, or a NaN offset) `previous` is kept.
pub fn resolve_active(
    scroll_y: f64,
    anchor_offset: f64,
    sections: &[SectionBounds],
    previous: SectionLabel,
) -> SectionLabel {
    let probe = scroll_y + anchor_offset;
    sections
        .iter()
        .find(|s| s.contains(probe))
        .map(|s| s.label)
        .unwrap_or(previous)
}

/// Holds the single active section of the page.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    order: Vec<SectionLabel>,
    active: SectionLabel,
    anchor_offset: f64,
}

impl SectionTracker {
    /// Track every page section in declared order.
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_sections(SectionLabel::ALL.to_vec(), config)
    }

    /// Track a custom ordered set. Duplicates are dropped; an empty set falls
    /// back to the full page.
    pub fn with_sections(sections: Vec<SectionLabel>, config: TrackerConfig) -> Self {
        let mut order: Vec<SectionLabel> = Vec::with_capacity(sections.len());
        for label in sections {
            if !order.contains(&label) {
                order.push(label);
            }
        }
        if order.is_empty() {
            warn!("section tracker created without sections, using the full page");
            order = SectionLabel::ALL.to_vec();
        }
        let active = order[0];
        Self {
            order,
            active,
            anchor_offset: config.anchor_offset,
        }
    }

    pub fn active(&self) -> SectionLabel {
        self.active
    }

    pub fn sections(&self) -> &[SectionLabel] {
        &self.order
    }

    pub fn anchor_offset(&self) -> f64 {
        self.anchor_offset
    }

    /// Re-evaluate against freshly measured geometry and store the result.
    ///
    /// Bounds for sections this tracker does not track are ignored, so the
    /// active label always stays within [`sections`](Self::sections).
    pub fn evaluate(&mut self, scroll_y: f64, sections: &[SectionBounds]) -> SectionLabel {
        let tracked: Vec<SectionBounds> = sections
            .iter()
            .filter(|s| self.order.contains(&s.label))
            .copied()
            .collect();
        let next = resolve_active(scroll_y, self.anchor_offset, &tracked, self.active);
        if next != self.active {
            debug!("active section {} -> {} at scroll_y={}", self.active, next, scroll_y);
            self.active = next;
        }
        next
    }

    /// Handle a scroll notification: read the offset and measure every
    /// tracked section from the surface, skipping any that are not mounted.
    pub fn on_scroll<S: PageSurface + ?Sized>(&mut self, surface: &S) -> SectionLabel {
        let bounds: Vec<SectionBounds> = self
            .order
            .iter()
            .filter_map(|&label| surface.measure(label))
            .collect();
        self.evaluate(surface.scroll_y(), &bounds)
    }

    /// Jump to a section. Returns `false` and leaves state untouched when the
    /// section is not tracked.
    pub fn navigate_to<S: PageSurface + ?Sized>(&mut self, label: SectionLabel, surface: &mut S) -> bool {
        if !self.order.contains(&label) {
            warn!("navigate_to: {} is not a tracked section", label);
            return false;
        }
        self.active = label;
        surface.scroll_into_view(label);
        true
    }

    /// Like `navigate_to`, taking a navigation name or element id.
    pub fn navigate_to_id<S: PageSurface + ?Sized>(&mut self, id: &str, surface: &mut S) -> bool {
        match id.parse::<SectionLabel>() {
            Ok(label) => self.navigate_to(label, surface),
            Err(e) => {
                warn!("navigate_to: {}", e);
                false
            }
        }
    }
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

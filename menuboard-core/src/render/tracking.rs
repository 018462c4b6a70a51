//! Active-section tracking for navigation highlighting.
//!
//! A section counts as "being read" while it overlaps the active band, a
//! horizontal strip of the viewport. The tracker behaves like a visibility
//! observer: it only reports sections whose overlap state changed since the
//! last sample, and among the reported entries the last intersecting one
//! becomes active.

use std::collections::HashMap;

/// The part of the viewport that decides the active section, given as
/// margins cut off the top and bottom (fractions of viewport height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBand {
    pub top_margin: f64,
    pub bottom_margin: f64,
}

impl Default for ActiveBand {
    /// From 20% to 30% of the viewport height.
    fn default() -> Self {
        Self {
            top_margin: 0.20,
            bottom_margin: 0.70,
        }
    }
}

impl ActiveBand {
    /// Band edges in pixels from the viewport top.
    pub fn edges(&self, viewport_height: f64) -> (f64, f64) {
        (
            viewport_height * self.top_margin,
            viewport_height * (1.0 - self.bottom_margin),
        )
    }

    /// The band as an observer root margin, e.g. `-20% 0px -70% 0px`.
    pub fn root_margin(&self) -> String {
        format!(
            "-{}% 0px -{}% 0px",
            (self.top_margin * 100.0).round(),
            (self.bottom_margin * 100.0).round()
        )
    }

    pub fn intersects(&self, viewport_height: f64, section: &SectionBounds) -> bool {
        let (top, bottom) = self.edges(viewport_height);
        bottom > top && section.top < bottom && section.bottom > top
    }
}

/// Position of a rendered section relative to the viewport top.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            id: id.into(),
            top,
            bottom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub id: String,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ActiveSectionTracker {
    band: ActiveBand,
    observed: Vec<String>,
    reported: HashMap<String, bool>,
    active: Option<String>,
}

impl ActiveSectionTracker {
    pub fn new(band: ActiveBand) -> Self {
        Self {
            band,
            ..Self::default()
        }
    }

    pub fn band(&self) -> ActiveBand {
        self.band
    }

    /// Watches a new set of sections, forgetting the previous ones.
    pub fn observe(&mut self, section_ids: Vec<String>) {
        self.observed = section_ids;
        self.reported.clear();
        self.active = None;
    }

    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Entries for observed sections whose overlap with the band changed.
    /// The first sample after [`observe`](Self::observe) reports every
    /// observed section.
    pub fn sample(&mut self, viewport_height: f64, bounds: &[SectionBounds]) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();
        for section in bounds {
            if !self.observed.contains(&section.id) {
                continue;
            }
            let now = self.band.intersects(viewport_height, section);
            if self.reported.insert(section.id.clone(), now) != Some(now) {
                entries.push(IntersectionEntry {
                    id: section.id.clone(),
                    is_intersecting: now,
                });
            }
        }
        entries
    }

    /// Processes entries in order; the last intersecting one wins.
    /// Returns the active section after processing.
    pub fn apply(&mut self, entries: &[IntersectionEntry]) -> Option<&str> {
        for entry in entries {
            if entry.is_intersecting && self.observed.contains(&entry.id) {
                self.active = Some(entry.id.clone());
            }
        }
        self.active.as_deref()
    }
}

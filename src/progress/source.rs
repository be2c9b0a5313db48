use crate::foundation::error::{ScrubError, ScrubResult};

/// Scroll range `[start, end)` in document px that drives one progress value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollRegion {
    start: f64,
    end: f64,
}

impl ScrollRegion {
    /// Create a validated region with finite bounds and `end > start`.
    pub fn new(start: f64, end: f64) -> ScrubResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ScrubError::configuration(format!(
                "scroll region bounds must be finite, got [{start}, {end})"
            )));
        }
        if end <= start {
            return Err(ScrubError::configuration(format!(
                "scroll region end must be > start, got [{start}, {end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Scroll offset where progress is `0`.
    pub fn start(self) -> f64 {
        self.start
    }

    /// Scroll offset where progress reaches `1`.
    pub fn end(self) -> f64 {
        self.end
    }

    /// Scroll distance covered by the region.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when `offset` is inside `[start, end)`.
    pub fn contains(self, offset: f64) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Converts a scroll offset into normalized progress for one region.
///
/// A degenerate source (trigger not measurable) reports `0` until it is rebuilt from a
/// successful measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSource {
    region: Option<ScrollRegion>,
}

impl ProgressSource {
    /// Source for `[region_start, region_end)`; rejects empty or inverted regions.
    pub fn new(region_start: f64, region_end: f64) -> ScrubResult<Self> {
        Ok(Self::from_region(ScrollRegion::new(region_start, region_end)?))
    }

    /// Source for an already validated region.
    pub fn from_region(region: ScrollRegion) -> Self {
        Self {
            region: Some(region),
        }
    }

    /// Source for a trigger that could not be measured.
    pub fn degenerate() -> Self {
        Self { region: None }
    }

    /// Return `true` when no region is measured.
    pub fn is_degenerate(&self) -> bool {
        self.region.is_none()
    }

    /// Measured region, if any.
    pub fn region(&self) -> Option<ScrollRegion> {
        self.region
    }

    /// Progress in `[0, 1]` for `scroll`.
    ///
    /// Exactly `0` at or before the region start and exactly `1` at or after its end.
    pub fn progress(&self, scroll: f64) -> f64 {
        let Some(region) = self.region else {
            return 0.0;
        };
        if scroll.is_nan() || scroll <= region.start {
            return 0.0;
        }
        if scroll >= region.end {
            return 1.0;
        }
        ((scroll - region.start) / region.len()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/source.rs"]
mod tests;

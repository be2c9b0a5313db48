use crate::animation::value::Length;
use crate::foundation::core::{Rect, Size, TargetId};
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::progress::source::{ProgressSource, ScrollRegion};

/// Alignment point between the trigger element and the viewport.
///
/// Both fields are fractions: `element` of the trigger's height, `viewport` of the viewport's
/// height. The region boundary is the scroll offset where the two points meet.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Point on the trigger (`0` top, `1` bottom).
    #[serde(default)]
    pub element: f64,
    /// Point on the viewport (`0` top, `1` bottom).
    #[serde(default)]
    pub viewport: f64,
}

impl Anchor {
    /// Trigger top meets viewport top.
    pub const TOP_TOP: Self = Self::new(0.0, 0.0);
    /// Trigger top meets viewport bottom.
    pub const TOP_BOTTOM: Self = Self::new(0.0, 1.0);
    /// Trigger bottom meets viewport top.
    pub const BOTTOM_TOP: Self = Self::new(1.0, 0.0);
    /// Trigger bottom meets viewport bottom.
    pub const BOTTOM_BOTTOM: Self = Self::new(1.0, 1.0);

    /// Build an anchor from fractions.
    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this anchor is satisfied.
    pub fn scroll_offset(self, trigger: Rect, viewport_height: f64) -> f64 {
        trigger.y0 + trigger.height() * self.element - viewport_height * self.viewport
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::TOP_TOP
    }
}

/// End boundary of a trigger region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndDef {
    /// Alignment point, like the start.
    Anchor(Anchor),
    /// Fixed scroll distance after the start.
    Distance(Length),
}

impl Default for EndDef {
    fn default() -> Self {
        Self::Anchor(Anchor::BOTTOM_TOP)
    }
}

/// Which element and which scroll range drive progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerDef {
    /// Element whose position defines the region.
    pub element: TargetId,
    /// Start boundary.
    #[serde(default)]
    pub start: Anchor,
    /// End boundary.
    #[serde(default)]
    pub end: EndDef,
}

impl TriggerDef {
    /// Trigger on `element` with default bounds (top/top to bottom/top).
    pub fn new(element: impl Into<TargetId>) -> Self {
        Self {
            element: element.into(),
            start: Anchor::default(),
            end: EndDef::default(),
        }
    }

    /// Set the start anchor.
    pub fn start(mut self, start: Anchor) -> Self {
        self.start = start;
        self
    }

    /// Set the end boundary.
    pub fn end(mut self, end: EndDef) -> Self {
        self.end = end;
        self
    }

    /// Resolve the scroll region for a measured trigger.
    ///
    /// An unmeasurable trigger (missing or zero height) yields a degenerate source rather than an
    /// error. A region whose end does not come after its start is a configuration error.
    pub fn resolve(&self, trigger: Option<Rect>, viewport: Size) -> ScrubResult<ProgressSource> {
        let Some(rect) = trigger.filter(|r| r.height() > 0.0 && r.is_finite()) else {
            tracing::debug!(trigger = %self.element, "trigger has no measurable extent; progress idle");
            return Ok(ProgressSource::degenerate());
        };
        let start = self.start.scroll_offset(rect, viewport.height);
        let end = match self.end {
            EndDef::Anchor(a) => a.scroll_offset(rect, viewport.height),
            EndDef::Distance(d) => start + d.resolve(viewport),
        };
        let region = ScrollRegion::new(start, end).map_err(|e| {
            ScrubError::configuration(format!("trigger '{}': {e}", self.element))
        })?;
        Ok(ProgressSource::from_region(region))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/trigger.rs"]
mod tests;

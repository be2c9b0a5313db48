//! Continuous progress to discrete segments (cards, slides, sections).
//!
//! The active index is always `floor(progress * count)` clamped to `[0, count - 1]`; the selector
//! only remembers which index it last reported so it can fire change notifications.

use crate::foundation::error::{ScrubError, ScrubResult};
use std::num::NonZeroUsize;

/// Active segment and progress within it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    /// Active index in `[0, count - 1]`.
    pub index: usize,
    /// Progress inside the active segment, in `[0, 1)`; exactly `1` only at overall progress `1`.
    pub local_progress: f64,
}

/// Scroll direction of a segment change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Increasing index.
    Forward,
    /// Decreasing index.
    Backward,
}

/// One index transition reported by [`SegmentSelector::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SegmentChange {
    /// Index that was active before this transition.
    pub previous: usize,
    /// Newly active index.
    pub index: usize,
    /// Direction of travel.
    pub direction: Direction,
}

/// Map `progress` onto `count` equal segments.
///
/// `progress` is clamped to `[0, 1]` (NaN counts as `0`). `local_progress` is in `[0, 1)`, except
/// at `progress == 1.0` where the last segment is returned with `local_progress == 1.0`, so the
/// end of the final segment is reachable.
pub fn select(progress: f64, count: NonZeroUsize) -> Segment {
    let n = count.get();
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let scaled = p * n as f64;
    let index = (scaled.floor() as usize).min(n - 1);
    Segment {
        index,
        local_progress: scaled - index as f64,
    }
}

/// Stateful segment tracker with exactly-once change notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentSelector {
    count: NonZeroUsize,
    current: usize,
    active: Vec<bool>,
}

impl SegmentSelector {
    /// Selector over `count` segments, starting at index `0`; `count == 0` is rejected.
    pub fn new(count: usize) -> ScrubResult<Self> {
        let count = NonZeroUsize::new(count)
            .ok_or_else(|| ScrubError::configuration("segment count must be > 0"))?;
        let mut active = vec![false; count.get()];
        active[0] = true;
        Ok(Self {
            count,
            current: 0,
            active,
        })
    }

    /// Number of segments.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Index most recently reported as active.
    pub fn active_index(&self) -> usize {
        self.current
    }

    /// Active flag of segment `index`; `false` when out of range.
    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    /// Stateless selection for `progress`.
    pub fn select(&self, progress: f64) -> Segment {
        select(progress, self.count)
    }

    /// Advance to the segment for `progress`, invoking `on_change` once per index crossed.
    ///
    /// A jump across several segments reports every intermediate index in travel order. Samples
    /// that stay inside the current segment report nothing.
    pub fn update(&mut self, progress: f64, mut on_change: impl FnMut(SegmentChange)) -> Segment {
        let seg = self.select(progress);
        if seg.index == self.current {
            return seg;
        }

        tracing::debug!(from = self.current, to = seg.index, "segment change");
        while self.current != seg.index {
            let (next, direction) = if seg.index > self.current {
                (self.current + 1, Direction::Forward)
            } else {
                (self.current - 1, Direction::Backward)
            };
            self.active[self.current] = false;
            self.active[next] = true;
            let change = SegmentChange {
                previous: self.current,
                index: next,
                direction,
            };
            self.current = next;
            on_change(change);
        }
        seg
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/selector.rs"]
mod tests;

use crate::animation::ease::Ease;
use crate::animation::value::{PropertyKind, Value};
use crate::foundation::core::TargetId;

/// One property's interpolation instruction, resolved for a viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Step {
    /// Element driven by this step.
    pub target: TargetId,
    /// Property written on `target`.
    pub property: PropertyKind,
    /// Value held before the step starts.
    pub from: Value,
    /// Value held after the step ends.
    pub to: Value,
    /// Start offset in normalized progress units.
    pub start: f64,
    /// Duration in normalized progress units, `> 0`.
    pub duration: f64,
    /// Easing applied to step-local time.
    pub ease: Ease,
}

impl Step {
    /// End offset (`start + duration`).
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Step-local time for `progress`, clamped to `[0, 1]`.
    pub fn local_t(&self, progress: f64) -> f64 {
        ((progress - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated value at `progress`.
    pub fn sample(&self, progress: f64) -> Value {
        let t = self.ease.apply(self.local_t(progress));
        Value::lerp(&self.from, &self.to, t)
    }
}

/// Steps sharing one `(target, property)` pair, ordered by start offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub(crate) target: TargetId,
    pub(crate) property: PropertyKind,
    pub(crate) steps: Vec<usize>,
}

impl Track {
    /// Element driven by this track.
    pub fn target(&self) -> &TargetId {
        &self.target
    }

    /// Property driven by this track.
    pub fn property(&self) -> PropertyKind {
        self.property
    }
}

/// Immutable, validated sequence of steps for one viewport size.
///
/// Built by [`crate::TimelineBuilder`]; rebuild it when the viewport changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub(crate) steps: Vec<Step>, // sorted by start
    pub(crate) tracks: Vec<Track>, // sorted by (target, property)
}

impl Timeline {
    /// All steps ordered by start offset.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// All tracks ordered by `(target, property)`.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Return `true` when the timeline drives nothing.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Largest step end offset, `0` for an empty timeline.
    pub fn end(&self) -> f64 {
        self.steps.iter().map(Step::end).fold(0.0, f64::max)
    }

    /// Value of one track at `progress`.
    ///
    /// The governing step is the last one whose start is `<= progress`, so a boundary shared by
    /// two touching steps belongs to the later step. Before the first step the track holds that
    /// step's `from` value.
    pub fn track_value(&self, track: &Track, progress: f64) -> Option<Value> {
        let first = *track.steps.first()?;
        let idx = track
            .steps
            .partition_point(|&i| self.steps[i].start <= progress);
        if idx == 0 {
            return Some(self.steps[first].from);
        }
        Some(self.steps[track.steps[idx - 1]].sample(progress))
    }

    /// Value of `target.property` at `progress`, if the timeline drives it.
    pub fn value_at(&self, target: &TargetId, property: PropertyKind, progress: f64) -> Option<Value> {
        let track = self
            .tracks
            .iter()
            .find(|t| &t.target == target && t.property == property)?;
        self.track_value(track, progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;

use crate::animation::value::{PropertyKind, Value};
use crate::apply::sink::StyleSink;
use crate::foundation::core::TargetId;
use crate::timeline::model::Timeline;

/// Value of one `(target, property)` pair at a progress sample.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PropertyState {
    /// Element.
    pub target: TargetId,
    /// Property.
    pub property: PropertyKind,
    /// Interpolated value.
    pub value: Value,
}

/// Complete presentation state of a timeline at one progress value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StateSnapshot {
    /// Progress the snapshot was computed for, clamped to `[0, 1]`.
    pub progress: f64,
    /// One entry per track, ordered by `(target, property)`.
    pub entries: Vec<PropertyState>,
}

impl StateSnapshot {
    /// Look up one property's value.
    pub fn get(&self, target: &TargetId, property: PropertyKind) -> Option<Value> {
        self.entries
            .iter()
            .find(|e| &e.target == target && e.property == property)
            .map(|e| e.value)
    }
}

/// Outcome of committing a snapshot to a sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CommitStats {
    /// Properties written.
    pub written: usize,
    /// Properties skipped because their target is detached.
    pub detached: usize,
}

/// Compute the value of every track at `progress` without touching any element.
pub fn compute_state(timeline: &Timeline, progress: f64) -> StateSnapshot {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let entries = timeline
        .tracks()
        .iter()
        .filter_map(|track| {
            let value = timeline.track_value(track, progress)?;
            Some(PropertyState {
                target: track.target().clone(),
                property: track.property(),
                value,
            })
        })
        .collect();
    StateSnapshot { progress, entries }
}

/// Write a snapshot to `sink`.
///
/// Targets that are no longer mounted are skipped silently.
pub fn commit<S: StyleSink + ?Sized>(snapshot: &StateSnapshot, sink: &mut S) -> CommitStats {
    let mut stats = CommitStats::default();
    for entry in &snapshot.entries {
        if !sink.is_mounted(&entry.target) {
            tracing::trace!(target = %entry.target, property = %entry.property, "skip detached target");
            stats.detached += 1;
            continue;
        }
        sink.set_property(&entry.target, entry.property, entry.value);
        stats.written += 1;
    }
    stats
}

/// Compute and commit the state of `timeline` at `progress`.
///
/// Idempotent: repeated calls with the same progress produce the same writes.
pub fn apply<S: StyleSink + ?Sized>(timeline: &Timeline, progress: f64, sink: &mut S) -> CommitStats {
    commit(&compute_state(timeline, progress), sink)
}

/// Remove every inline override `timeline` may have written.
pub fn release<S: StyleSink + ?Sized>(timeline: &Timeline, sink: &mut S) {
    for track in timeline.tracks() {
        sink.clear_property(track.target(), track.property());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/apply/state.rs"]
mod tests;

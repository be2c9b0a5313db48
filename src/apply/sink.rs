use crate::animation::value::{PropertyKind, Value};
use crate::foundation::core::{Rect, Size, TargetId};
use std::collections::{BTreeMap, BTreeSet};

/// Side-effecting boundary between the engine and on-screen elements.
///
/// Every presentation write the engine performs goes through this trait, so hosts can route
/// writes to real elements and tests can record them instead.
pub trait StyleSink {
    /// Return `true` when `target` is currently attached to the document.
    fn is_mounted(&self, target: &TargetId) -> bool;
    /// Set an inline property override.
    fn set_property(&mut self, target: &TargetId, property: PropertyKind, value: Value);
    /// Remove an inline property override.
    fn clear_property(&mut self, target: &TargetId, property: PropertyKind);
    /// Insert an in-flow placeholder of `size` where `target` sits, so pinning does not shift layout.
    fn insert_placeholder(&mut self, target: &TargetId, size: Size);
    /// Remove the placeholder inserted for `target`.
    fn remove_placeholder(&mut self, target: &TargetId);
    /// Fix `target` at `rect` in viewport coordinates.
    fn pin(&mut self, target: &TargetId, rect: Rect);
    /// Restore `target`'s original positioning.
    fn unpin(&mut self, target: &TargetId);
}

/// One write observed by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SinkWrite {
    /// [`StyleSink::set_property`].
    Set {
        /// Element.
        target: TargetId,
        /// Property.
        property: PropertyKind,
        /// Value.
        value: Value,
    },
    /// [`StyleSink::clear_property`].
    Clear {
        /// Element.
        target: TargetId,
        /// Property.
        property: PropertyKind,
    },
    /// [`StyleSink::insert_placeholder`].
    InsertPlaceholder {
        /// Element.
        target: TargetId,
        /// Placeholder size.
        size: Size,
    },
    /// [`StyleSink::remove_placeholder`].
    RemovePlaceholder {
        /// Element.
        target: TargetId,
    },
    /// [`StyleSink::pin`].
    Pin {
        /// Element.
        target: TargetId,
        /// Viewport rect.
        rect: Rect,
    },
    /// [`StyleSink::unpin`].
    Unpin {
        /// Element.
        target: TargetId,
    },
}

/// In-memory sink for tests, the CLI, and leak checks.
///
/// Tracks the live inline overrides, pins, and placeholders, plus an ordered log of writes.
/// Targets are mounted unless explicitly detached.
#[derive(Debug, Default)]
pub struct RecordingSink {
    styles: BTreeMap<(TargetId, PropertyKind), Value>,
    pinned: BTreeMap<TargetId, Rect>,
    placeholders: BTreeMap<TargetId, Size>,
    detached: BTreeSet<TargetId>,
    writes: Vec<SinkWrite>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate removing `target` from the document.
    pub fn detach(&mut self, target: impl Into<TargetId>) {
        self.detached.insert(target.into());
    }

    /// Simulate re-attaching `target`.
    pub fn attach(&mut self, target: &TargetId) {
        self.detached.remove(target);
    }

    /// Current inline override for `target.property`.
    pub fn style(&self, target: &TargetId, property: PropertyKind) -> Option<Value> {
        self.styles.get(&(target.clone(), property)).copied()
    }

    /// Viewport rect `target` is pinned at, if pinned.
    pub fn pinned(&self, target: &TargetId) -> Option<Rect> {
        self.pinned.get(target).copied()
    }

    /// Placeholder size inserted for `target`, if any.
    pub fn placeholder(&self, target: &TargetId) -> Option<Size> {
        self.placeholders.get(target).copied()
    }

    /// Ordered write log.
    pub fn writes(&self) -> &[SinkWrite] {
        &self.writes
    }

    /// Drain the write log, keeping live state.
    pub fn take_writes(&mut self) -> Vec<SinkWrite> {
        std::mem::take(&mut self.writes)
    }

    /// Number of inline overrides, pins, and placeholders still in place.
    pub fn residual_overrides(&self) -> usize {
        self.styles.len() + self.pinned.len() + self.placeholders.len()
    }
}

impl StyleSink for RecordingSink {
    fn is_mounted(&self, target: &TargetId) -> bool {
        !self.detached.contains(target)
    }

    fn set_property(&mut self, target: &TargetId, property: PropertyKind, value: Value) {
        if !self.is_mounted(target) {
            return;
        }
        self.styles.insert((target.clone(), property), value);
        self.writes.push(SinkWrite::Set {
            target: target.clone(),
            property,
            value,
        });
    }

    fn clear_property(&mut self, target: &TargetId, property: PropertyKind) {
        if self.styles.remove(&(target.clone(), property)).is_some() {
            self.writes.push(SinkWrite::Clear {
                target: target.clone(),
                property,
            });
        }
    }

    fn insert_placeholder(&mut self, target: &TargetId, size: Size) {
        self.placeholders.insert(target.clone(), size);
        self.writes.push(SinkWrite::InsertPlaceholder {
            target: target.clone(),
            size,
        });
    }

    fn remove_placeholder(&mut self, target: &TargetId) {
        if self.placeholders.remove(target).is_some() {
            self.writes.push(SinkWrite::RemovePlaceholder {
                target: target.clone(),
            });
        }
    }

    fn pin(&mut self, target: &TargetId, rect: Rect) {
        self.pinned.insert(target.clone(), rect);
        self.writes.push(SinkWrite::Pin {
            target: target.clone(),
            rect,
        });
    }

    fn unpin(&mut self, target: &TargetId) {
        if self.pinned.remove(target).is_some() {
            self.writes.push(SinkWrite::Unpin {
                target: target.clone(),
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/apply/sink.rs"]
mod tests;

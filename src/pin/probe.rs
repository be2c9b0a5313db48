use crate::foundation::core::{Rect, Size, TargetId};
use crate::foundation::error::{ScrubError, ScrubResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read-only access to element geometry after layout.
pub trait LayoutProbe {
    /// Document-space rect of `target` in normal flow, or `None` when it cannot be measured.
    fn measure(&self, target: &TargetId) -> Option<Rect>;
}

/// Fixed element geometry, loaded from JSON or assembled in tests.
///
/// Rects can be changed after construction to simulate late-loading content.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StaticLayout {
    /// Viewport size the layout was captured at.
    pub viewport: Size,
    #[serde(default)]
    elements: RefCell<BTreeMap<TargetId, Rect>>,
}

impl StaticLayout {
    /// Empty layout for a viewport of `viewport` size.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            elements: RefCell::default(),
        }
    }

    /// Add or replace an element rect, builder style.
    pub fn with(self, target: impl Into<TargetId>, rect: Rect) -> Self {
        self.set(target, rect);
        self
    }

    /// Add or replace an element rect.
    pub fn set(&self, target: impl Into<TargetId>, rect: Rect) {
        self.elements.borrow_mut().insert(target.into(), rect);
    }

    /// Forget an element, making it unmeasurable.
    pub fn remove(&self, target: &TargetId) {
        self.elements.borrow_mut().remove(target);
    }

    /// Parse a layout from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrubResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrubError::serde(format!("parse layout JSON: {e}")))
    }

    /// Parse a layout from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrubResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrubError::Other(anyhow::anyhow!("open layout JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

impl LayoutProbe for StaticLayout {
    fn measure(&self, target: &TargetId) -> Option<Rect> {
        self.elements.borrow().get(target).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pin/probe.rs"]
mod tests;

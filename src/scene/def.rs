use crate::foundation::core::{Size, TargetId};
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::progress::trigger::TriggerDef;
use crate::segment::SegmentSelector;
use crate::timeline::def::TimelineDef;
use crate::timeline::model::Timeline;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON-facing description of one scroll-linked component.
///
/// ```json
/// {
///   "trigger": { "element": "hero", "end": { "distance": { "vh": 200 } } },
///   "pin": "hero-inner",
///   "segments": 3,
///   "timeline": { "steps": [
///     { "target": "title", "property": "opacity",
///       "from": { "scalar": 0 }, "to": { "scalar": 1 },
///       "at": { "absolute": 0.2 }, "duration": 0.3 }
///   ] }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    /// Region that drives progress.
    pub trigger: TriggerDef,
    /// Element held in place while the region is active; omit for no pinning.
    #[serde(default)]
    pub pin: Option<TargetId>,
    /// Number of discrete segments; omit when the scene has none.
    #[serde(default)]
    pub segments: Option<usize>,
    /// Interpolation steps.
    #[serde(default)]
    pub timeline: TimelineDef,
}

impl SceneDef {
    /// Scene driven by `trigger` with no pin, no segments, and an empty timeline.
    pub fn new(trigger: TriggerDef) -> Self {
        Self {
            trigger,
            pin: None,
            segments: None,
            timeline: TimelineDef::default(),
        }
    }

    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrubResult<Self> {
        serde_json::from_reader(r).map_err(|e| ScrubError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrubResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrubError::Other(anyhow::anyhow!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build the timeline for `viewport`.
    pub fn build_timeline(&self, viewport: Size) -> ScrubResult<Timeline> {
        self.timeline.build(viewport)
    }

    /// Build the segment selector, if the scene has segments.
    pub fn build_selector(&self) -> ScrubResult<Option<SegmentSelector>> {
        self.segments.map(SegmentSelector::new).transpose()
    }

    /// Check every construction-time invariant for `viewport` without mounting.
    pub fn validate(&self, viewport: Size) -> ScrubResult<()> {
        self.build_timeline(viewport)?;
        self.build_selector()?;
        Ok(())
    }
}

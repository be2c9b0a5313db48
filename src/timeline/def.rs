use crate::foundation::core::Size;
use crate::foundation::error::ScrubResult;
use crate::timeline::builder::{StepDef, TimelineBuilder};
use crate::timeline::model::Timeline;

/// JSON-facing timeline description.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineDef {
    /// Steps in authoring order; relative positions refer to the previous entry.
    pub steps: Vec<StepDef>,
}

impl TimelineDef {
    /// Validate and resolve this description for `viewport`.
    pub fn build(&self, viewport: Size) -> ScrubResult<Timeline> {
        TimelineBuilder::from_steps(self.steps.clone()).build(viewport)
    }
}

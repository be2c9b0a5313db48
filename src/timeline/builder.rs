use crate::animation::ease::Ease;
use crate::animation::value::{PropertyKind, ValueDef};
use crate::foundation::core::{Size, TargetId};
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::timeline::model::{Step, Timeline, Track};

// Tolerance for offsets produced by summing fractional durations.
const OFFSET_EPS: f64 = 1e-9;

/// Where a step starts, relative to the timeline or to the previously added step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum At {
    /// Absolute start offset in `[0, 1]`.
    Absolute(f64),
    /// Start when the previously added step ends, plus a gap (may be negative).
    AfterPrevious(f64),
    /// Start with the previously added step, plus an offset.
    WithPrevious(f64),
}

impl Default for At {
    fn default() -> Self {
        Self::AfterPrevious(0.0)
    }
}

/// Declarative step description.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepDef {
    /// Element driven by this step.
    pub target: TargetId,
    /// Property written on `target`.
    pub property: PropertyKind,
    /// Start value.
    pub from: ValueDef,
    /// End value.
    pub to: ValueDef,
    /// Start position.
    #[serde(default)]
    pub at: At,
    /// Duration in normalized progress units, in `(0, 1]`.
    pub duration: f64,
    /// Easing applied to step-local time.
    #[serde(default)]
    pub ease: Ease,
    /// Allow this step to overlap earlier steps on the same track; it wins from its start.
    #[serde(default)]
    pub overrides: bool,
    /// Allow `start + duration` to exceed `1`.
    #[serde(default)]
    pub runs_past_end: bool,
}

impl StepDef {
    /// Step from `from` to `to` with full duration, starting after the previous step.
    pub fn new(
        target: impl Into<TargetId>,
        property: PropertyKind,
        from: impl Into<ValueDef>,
        to: impl Into<ValueDef>,
    ) -> Self {
        Self {
            target: target.into(),
            property,
            from: from.into(),
            to: to.into(),
            at: At::default(),
            duration: 1.0,
            ease: Ease::Linear,
            overrides: false,
            runs_past_end: false,
        }
    }

    /// Set the start position.
    pub fn at(mut self, at: At) -> Self {
        self.at = at;
        self
    }

    /// Set the duration.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Set the easing.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Mark this step as an explicit override of earlier overlapping steps.
    pub fn overrides(mut self, yes: bool) -> Self {
        self.overrides = yes;
        self
    }

    /// Allow this step to run past the nominal end.
    pub fn runs_past_end(mut self, yes: bool) -> Self {
        self.runs_past_end = yes;
        self
    }
}

/// Assembles a [`Timeline`] from step descriptions.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    steps: Vec<StepDef>,
}

impl TimelineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated with `steps`.
    pub fn from_steps(steps: Vec<StepDef>) -> Self {
        Self { steps }
    }

    /// Append one step.
    pub fn step(mut self, step: StepDef) -> Self {
        self.steps.push(step);
        self
    }

    /// Append one step per target, each starting `each` after the previous one.
    ///
    /// The first step uses `template.at`; the rest are positioned relative to their predecessor.
    pub fn stagger<I, T>(mut self, targets: I, template: StepDef, each: f64) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        for (i, target) in targets.into_iter().enumerate() {
            let mut step = template.clone();
            step.target = target.into();
            if i > 0 {
                step.at = At::WithPrevious(each);
            }
            self.steps.push(step);
        }
        self
    }

    /// Validate and resolve all steps for `viewport`.
    ///
    /// Fails with a configuration error for offsets outside `[0, 1]`, non-positive durations,
    /// accidental runs past the end, value kinds that do not match the property, and overlapping
    /// steps on one track without an explicit override.
    #[tracing::instrument(skip(self), fields(steps = self.steps.len()))]
    pub fn build(&self, viewport: Size) -> ScrubResult<Timeline> {
        let mut resolved: Vec<(Step, bool)> = Vec::with_capacity(self.steps.len());
        let (mut prev_start, mut prev_end) = (0.0, 0.0);

        for (i, def) in self.steps.iter().enumerate() {
            let start = match def.at {
                At::Absolute(t) => t,
                At::AfterPrevious(gap) => prev_end + gap,
                At::WithPrevious(offset) => prev_start + offset,
            };
            let step = resolve_step(i, def, start, viewport)?;
            prev_start = step.start;
            prev_end = step.end();
            resolved.push((step, def.overrides));
        }

        resolved.sort_by(|a, b| a.0.start.total_cmp(&b.0.start));
        let (steps, overrides): (Vec<Step>, Vec<bool>) = resolved.into_iter().unzip();

        let mut tracks: Vec<Track> = Vec::new();
        for (i, step) in steps.iter().enumerate() {
            match tracks
                .iter_mut()
                .find(|t| t.target == step.target && t.property == step.property)
            {
                Some(track) => track.steps.push(i),
                None => tracks.push(Track {
                    target: step.target.clone(),
                    property: step.property,
                    steps: vec![i],
                }),
            }
        }
        tracks.sort_by(|a, b| (&a.target, a.property).cmp(&(&b.target, b.property)));

        for track in &tracks {
            // Compare against the longest-running earlier step, not just the adjacent one.
            let mut reach: Option<usize> = None;
            for &i in &track.steps {
                let b = &steps[i];
                if let Some(a) = reach.map(|j| &steps[j]) {
                    if b.start < a.end() - OFFSET_EPS && !overrides[i] {
                        return Err(ScrubError::OverlappingSteps {
                            target: track.target.clone(),
                            property: track.property,
                            a_start: a.start,
                            a_end: a.end(),
                            b_start: b.start,
                            b_end: b.end(),
                        });
                    }
                }
                if reach.is_none_or(|j| b.end() > steps[j].end()) {
                    reach = Some(i);
                }
            }
        }

        tracing::debug!(tracks = tracks.len(), "timeline built");
        Ok(Timeline { steps, tracks })
    }
}

fn resolve_step(index: usize, def: &StepDef, start: f64, viewport: Size) -> ScrubResult<Step> {
    let err = |msg: String| {
        ScrubError::configuration(format!(
            "step #{index} ('{}'.{}): {msg}",
            def.target, def.property
        ))
    };

    if !start.is_finite() || !(-OFFSET_EPS..=1.0 + OFFSET_EPS).contains(&start) {
        return Err(err(format!("start offset {start} is outside [0, 1]")));
    }
    let start = start.clamp(0.0, 1.0);

    let duration = def.duration;
    if !duration.is_finite() || duration <= 0.0 || duration > 1.0 {
        return Err(err(format!("duration {duration} is outside (0, 1]")));
    }
    if start + duration > 1.0 + OFFSET_EPS && !def.runs_past_end {
        return Err(err(format!(
            "ends at {} past the timeline end without runs_past_end",
            start + duration
        )));
    }
    def.ease.validate().map_err(|e| err(e.to_string()))?;

    let expected = def.property.value_kind();
    let from = def.from.resolve(viewport)?;
    let to = def.to.resolve(viewport)?;
    for (label, v) in [("from", &from), ("to", &to)] {
        if v.kind() != expected {
            return Err(err(format!(
                "{label} value is {:?}, property expects {expected:?}",
                v.kind()
            )));
        }
    }

    Ok(Step {
        target: def.target.clone(),
        property: def.property,
        from,
        to,
        start,
        duration,
        ease: def.ease,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;

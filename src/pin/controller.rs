use crate::apply::sink::StyleSink;
use crate::foundation::core::{Rect, Size, TargetId, Viewport};
use crate::foundation::error::ScrubResult;
use crate::pin::probe::LayoutProbe;
use crate::progress::source::ProgressSource;
use crate::progress::trigger::TriggerDef;

/// Where the scroll offset sits relative to the pin region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinState {
    /// Before the region start (or region not measured).
    Before,
    /// Inside `[start, end)`; the pinned element is held in place.
    Active,
    /// At or past the region end.
    After,
}

/// Region entry or exit observed by [`PinController::on_scroll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinTransition {
    /// Entered the region from `from`.
    Enter {
        /// State before entering.
        from: PinState,
    },
    /// Left the region towards `to`.
    Leave {
        /// State after leaving.
        to: PinState,
    },
    /// Jumped over the whole region in one sample.
    Skip {
        /// State before the jump.
        from: PinState,
        /// State after the jump.
        to: PinState,
    },
}

/// Result of feeding one scroll sample to a [`PinController`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PinUpdate {
    /// Region progress in `[0, 1]`.
    pub progress: f64,
    /// State after the sample.
    pub state: PinState,
    /// Entry or exit caused by this sample, if any.
    pub transition: Option<PinTransition>,
}

/// Owns one trigger region and, optionally, the element pinned while it is active.
///
/// The controller starts unmeasured (idle). Boundaries are only ever rebuilt wholesale via
/// [`PinController::measure`] or [`PinController::remeasure`].
#[derive(Clone, Debug)]
pub struct PinController {
    trigger: TriggerDef,
    pinned: Option<TargetId>,
    source: ProgressSource,
    pinned_rect: Option<Rect>,
    state: PinState,
    engaged: bool,
    progress: f64,
}

impl PinController {
    /// Controller for `trigger`, pinning `pinned` while active (`None` = no pin).
    pub fn new(trigger: TriggerDef, pinned: Option<TargetId>) -> Self {
        Self {
            trigger,
            pinned,
            source: ProgressSource::degenerate(),
            pinned_rect: None,
            state: PinState::Before,
            engaged: false,
            progress: 0.0,
        }
    }

    /// Trigger definition.
    pub fn trigger(&self) -> &TriggerDef {
        &self.trigger
    }

    /// Element pinned while active, if any.
    pub fn pinned_target(&self) -> Option<&TargetId> {
        self.pinned.as_ref()
    }

    /// Current progress source.
    pub fn source(&self) -> &ProgressSource {
        &self.source
    }

    /// Last computed progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Last computed state.
    pub fn state(&self) -> PinState {
        self.state
    }

    /// Return `true` while pin styles and the placeholder are in place.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Measure the trigger (and pinned element) and rebuild the region.
    ///
    /// Does not touch the sink; call [`PinController::on_scroll`] afterwards to sync state.
    pub fn measure<P: LayoutProbe + ?Sized>(&mut self, probe: &P, viewport: Size) -> ScrubResult<()> {
        let rect = probe.measure(&self.trigger.element);
        self.source = self.trigger.resolve(rect, viewport)?;
        self.pinned_rect = self.pinned.as_ref().and_then(|p| probe.measure(p));
        if let (Some(p), None) = (&self.pinned, self.pinned_rect) {
            tracing::debug!(pinned = %p, "pinned element not measurable; pin disabled");
        }
        Ok(())
    }

    /// Feed one scroll sample: recompute progress and engage or release the pin.
    pub fn on_scroll<S: StyleSink + ?Sized>(&mut self, scroll: f64, sink: &mut S) -> PinUpdate {
        self.progress = self.source.progress(scroll);
        let next = match self.source.region() {
            None => PinState::Before,
            Some(r) if scroll < r.start() => PinState::Before,
            Some(r) if scroll >= r.end() => PinState::After,
            Some(_) => PinState::Active,
        };

        let prev = self.state;
        let transition = match (prev, next) {
            (a, b) if a == b => None,
            (from, PinState::Active) => Some(PinTransition::Enter { from }),
            (PinState::Active, to) => Some(PinTransition::Leave { to }),
            (from, to) => Some(PinTransition::Skip { from, to }),
        };
        self.state = next;

        if next == PinState::Active {
            self.engage(sink);
        } else {
            self.release(sink);
        }
        if let Some(t) = transition {
            tracing::debug!(trigger = %self.trigger.element, ?t, progress = self.progress, "pin transition");
        }

        PinUpdate {
            progress: self.progress,
            state: next,
            transition,
        }
    }

    /// Tear the region down and rebuild it from fresh measurements, then resync to `viewport.scroll`.
    ///
    /// Used on late-load signals and viewport resizes so boundaries never go stale.
    pub fn remeasure<P, S>(
        &mut self,
        probe: &P,
        viewport: Viewport,
        sink: &mut S,
    ) -> ScrubResult<PinUpdate>
    where
        P: LayoutProbe + ?Sized,
        S: StyleSink + ?Sized,
    {
        self.teardown(sink);
        let measured = self.measure(probe, viewport.size);
        if measured.is_err() {
            self.source = ProgressSource::degenerate();
        }
        let update = self.on_scroll(viewport.scroll, sink);
        tracing::debug!(trigger = %self.trigger.element, region = ?self.source.region(), "remeasured");
        measured.map(|()| update)
    }

    /// Restore original positioning and forget the current state. Safe to call repeatedly.
    pub fn teardown<S: StyleSink + ?Sized>(&mut self, sink: &mut S) {
        self.release(sink);
        self.state = PinState::Before;
        self.progress = 0.0;
    }

    fn engage<S: StyleSink + ?Sized>(&mut self, sink: &mut S) {
        if self.engaged {
            return;
        }
        let (Some(target), Some(rect), Some(region)) =
            (&self.pinned, self.pinned_rect, self.source.region())
        else {
            return;
        };
        if !sink.is_mounted(target) {
            return;
        }
        sink.insert_placeholder(target, rect.size());
        // Hold the element where it sat in the viewport when the region started.
        let at = Rect::from_origin_size((rect.x0, rect.y0 - region.start()), rect.size());
        sink.pin(target, at);
        self.engaged = true;
    }

    fn release<S: StyleSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.engaged {
            return;
        }
        if let Some(target) = &self.pinned {
            sink.unpin(target);
            sink.remove_placeholder(target);
        }
        self.engaged = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pin/controller.rs"]
mod tests;

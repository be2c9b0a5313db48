use crate::apply::sink::StyleSink;
use crate::apply::state::{CommitStats, apply, release};
use crate::foundation::core::Viewport;
use crate::foundation::error::ScrubResult;
use crate::host::{Host, HostEvent, HostEventKind, Subscription};
use crate::pin::controller::{PinController, PinState};
use crate::pin::probe::LayoutProbe;
use crate::scene::def::SceneDef;
use crate::segment::{Segment, SegmentChange, SegmentSelector};
use crate::timeline::model::Timeline;
use std::cell::RefCell;
use std::rc::Rc;

/// Observable state of a scene after its latest sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SceneFrame {
    /// Scroll offset of the sample.
    pub scroll: f64,
    /// Region progress in `[0, 1]`.
    pub progress: f64,
    /// Pin state.
    pub pin: PinState,
    /// Active segment, for scenes with segments.
    pub segment: Option<Segment>,
    /// Writes performed for the sample.
    pub commit: CommitStats,
}

type SegmentCallback = Box<dyn FnMut(SegmentChange)>;

struct SceneState<S> {
    def: SceneDef,
    timeline: Timeline,
    pin: PinController,
    selector: Option<SegmentSelector>,
    probe: Rc<dyn LayoutProbe>,
    sink: Rc<RefCell<S>>,
    on_segment: Option<SegmentCallback>,
    last: SceneFrame,
    mounted: bool,
}

impl<S: StyleSink> SceneState<S> {
    // Returns the segment changes; the caller reports them once the state is no longer borrowed.
    fn handle(&mut self, event: &HostEvent) -> Vec<SegmentChange> {
        if !self.mounted {
            return Vec::new();
        }
        match event.kind {
            HostEventKind::Scroll => self.sync(event.viewport.scroll),
            HostEventKind::Resize => self.rebuild(event.viewport),
            HostEventKind::Load => self.remeasure(event.viewport),
        }
    }

    fn sync(&mut self, scroll: f64) -> Vec<SegmentChange> {
        let (progress, pin, commit) = {
            let mut sink = self.sink.borrow_mut();
            let update = self.pin.on_scroll(scroll, &mut *sink);
            let commit = apply(&self.timeline, update.progress, &mut *sink);
            (update.progress, update.state, commit)
        };

        let mut changes = Vec::new();
        let segment = self
            .selector
            .as_mut()
            .map(|sel| sel.update(progress, |change| changes.push(change)));

        self.last = SceneFrame {
            scroll,
            progress,
            pin,
            segment,
            commit,
        };
        changes
    }

    fn rebuild(&mut self, viewport: Viewport) -> Vec<SegmentChange> {
        match self.def.build_timeline(viewport.size) {
            Ok(timeline) => {
                release(&self.timeline, &mut *self.sink.borrow_mut());
                self.timeline = timeline;
            }
            Err(e) => {
                tracing::warn!(error = %e, "timeline rebuild failed; keeping previous timeline");
            }
        }
        self.remeasure(viewport)
    }

    fn remeasure(&mut self, viewport: Viewport) -> Vec<SegmentChange> {
        let result = {
            let mut sink = self.sink.borrow_mut();
            self.pin.remeasure(self.probe.as_ref(), viewport, &mut *sink)
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "remeasure failed; region idle until next remeasure");
        }
        self.sync(viewport.scroll)
    }

    fn teardown(&mut self) {
        self.mounted = false;
        let mut sink = self.sink.borrow_mut();
        self.pin.teardown(&mut *sink);
        release(&self.timeline, &mut *sink);
    }
}

/// One mounted scroll-linked component: a timeline, an optional pin, optional segments.
///
/// Mounting subscribes to the host; dropping (or [`ScrollScene::unmount`]) unsubscribes, unpins,
/// removes the placeholder, and clears every inline override the timeline wrote.
pub struct ScrollScene<S: StyleSink + 'static> {
    state: Rc<RefCell<SceneState<S>>>,
    subscription: Option<Subscription>,
}

impl<S: StyleSink + 'static> ScrollScene<S> {
    /// Validate `def`, measure layout, apply the initial state, and subscribe to `host`.
    ///
    /// Configuration errors are returned before anything is written or registered.
    #[tracing::instrument(skip_all, fields(trigger = %def.trigger.element))]
    pub fn mount<P: LayoutProbe + 'static>(
        def: SceneDef,
        host: &Host,
        probe: Rc<P>,
        sink: Rc<RefCell<S>>,
    ) -> ScrubResult<Self> {
        let viewport = host.viewport();
        let timeline = def.build_timeline(viewport.size)?;
        let selector = def.build_selector()?;
        let mut pin = PinController::new(def.trigger.clone(), def.pin.clone());
        pin.measure(probe.as_ref(), viewport.size)?;

        let state = Rc::new(RefCell::new(SceneState {
            def,
            timeline,
            pin,
            selector,
            probe,
            sink,
            on_segment: None,
            last: SceneFrame {
                scroll: viewport.scroll,
                progress: 0.0,
                pin: PinState::Before,
                segment: None,
                commit: CommitStats::default(),
            },
            mounted: true,
        }));
        // No callback can be registered yet, so the initial selection reports nothing.
        let _ = state.borrow_mut().sync(viewport.scroll);

        let weak = Rc::downgrade(&state);
        let subscription = host.on_event(move |event| {
            if let Some(state) = weak.upgrade() {
                let changes = state.borrow_mut().handle(event);
                notify(&state, changes);
            }
        });
        tracing::debug!("scene mounted");

        Ok(Self {
            state,
            subscription: Some(subscription),
        })
    }

    /// Register the callback fired once per segment index change, replacing any previous one.
    pub fn on_segment_change(&self, cb: impl FnMut(SegmentChange) + 'static) {
        self.state.borrow_mut().on_segment = Some(Box::new(cb));
    }

    /// State after the latest sample.
    pub fn frame(&self) -> SceneFrame {
        self.state.borrow().last
    }

    /// Current region progress.
    pub fn progress(&self) -> f64 {
        self.frame().progress
    }

    /// Current pin state.
    pub fn pin_state(&self) -> PinState {
        self.frame().pin
    }

    /// Active segment index, for scenes with segments.
    pub fn active_segment(&self) -> Option<usize> {
        self.state
            .borrow()
            .selector
            .as_ref()
            .map(SegmentSelector::active_index)
    }

    /// Copy of the timeline currently in use.
    pub fn timeline(&self) -> Timeline {
        self.state.borrow().timeline.clone()
    }

    /// Unsubscribe and restore every element this scene touched.
    pub fn unmount(self) {
        drop(self);
    }
}

// Callbacks may read, re-register on, or drop their own scene, so none of them runs while the
// state is borrowed.
fn notify<S: StyleSink>(state: &RefCell<SceneState<S>>, changes: Vec<SegmentChange>) {
    if changes.is_empty() {
        return;
    }
    let Some(mut cb) = state.borrow_mut().on_segment.take() else {
        return;
    };
    for change in changes {
        if !state.borrow().mounted {
            break;
        }
        cb(change);
    }
    let mut st = state.borrow_mut();
    if st.mounted && st.on_segment.is_none() {
        st.on_segment = Some(cb);
        return;
    }
    drop(st);
    drop(cb);
}

impl<S: StyleSink + 'static> Drop for ScrollScene<S> {
    fn drop(&mut self) {
        drop(self.subscription.take());
        match self.state.try_borrow_mut() {
            Ok(mut state) => state.teardown(),
            Err(_) => tracing::warn!("scene dropped while handling an event; teardown skipped"),
        }
        tracing::debug!("scene unmounted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mount.rs"]
mod tests;

//! scrubline maps scroll position to interpolated, reversible visual state.
//!
//! A scroll-linked component is described by a [`SceneDef`]: a trigger region that turns scroll
//! offset into progress, an optional element to pin while the region is active, an optional
//! number of discrete segments, and a [`Timeline`] of interpolation steps.
//!
//! # Pipeline overview
//!
//! 1. **Progress**: `scroll offset -> [0, 1]` via [`ProgressSource`] (resolved from a [`TriggerDef`])
//! 2. **Compute**: `Timeline + progress -> StateSnapshot` via [`compute_state`] (pure)
//! 3. **Commit**: `StateSnapshot -> StyleSink` via [`commit`] (the only side-effecting step)
//! 4. **Segments**: `progress -> Segment` plus exactly-once [`SegmentChange`] notifications
//!
//! [`ScrollScene`] composes the steps against a [`Host`] (scroll/resize/load events), a
//! [`LayoutProbe`] (element geometry), and a [`StyleSink`] (presentation writes).
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: computing state is a pure function of timeline and progress.
//! - **Fail fast on authoring mistakes**: invalid regions, zero segments, and overlapping steps are
//!   rejected at build time; degenerate measurements and detached targets degrade silently.
//! - **Guaranteed release**: dropping a mounted scene removes its listener, pin, placeholder, and
//!   every inline override it wrote.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod apply;
mod foundation;
mod pin;
mod progress;
mod scene;
mod timeline;

pub mod host;
pub mod segment;

pub use animation::ease::Ease;
pub use animation::value::{InsetDef, Length, Lerp, PropertyKind, Value, ValueDef, ValueKind};
pub use apply::sink::{RecordingSink, SinkWrite, StyleSink};
pub use apply::state::{
    CommitStats, PropertyState, StateSnapshot, apply, commit, compute_state, release,
};
pub use foundation::core::{Insets, Point, Rect, Rgba8, Size, TargetId, Vec2, Viewport};
pub use foundation::error::{ScrubError, ScrubResult};
pub use host::{Host, HostEvent, HostEventKind, Subscription};
pub use pin::controller::{PinController, PinState, PinTransition, PinUpdate};
pub use pin::probe::{LayoutProbe, StaticLayout};
pub use progress::source::{ProgressSource, ScrollRegion};
pub use progress::trigger::{Anchor, EndDef, TriggerDef};
pub use scene::def::SceneDef;
pub use scene::mount::{SceneFrame, ScrollScene};
pub use segment::{Direction, Segment, SegmentChange, SegmentSelector, select};
pub use timeline::builder::{At, StepDef, TimelineBuilder};
pub use timeline::def::TimelineDef;
pub use timeline::model::{Step, Timeline, Track};

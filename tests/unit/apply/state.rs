use super::*;
use crate::animation::ease::Ease;
use crate::apply::sink::RecordingSink;
use crate::foundation::core::{Rgba8, Size};
use crate::timeline::builder::{At, StepDef, TimelineBuilder};

fn build(steps: Vec<StepDef>) -> Timeline {
    TimelineBuilder::from_steps(steps)
        .build(Size::new(1280.0, 800.0))
        .unwrap()
}

fn scalar(snapshot: &StateSnapshot, target: &str, property: PropertyKind) -> f64 {
    snapshot
        .get(&TargetId::new(target), property)
        .and_then(|v| v.as_scalar())
        .unwrap()
}

#[test]
fn single_step_holds_before_interpolates_within_and_holds_after() {
    let tl = build(vec![
        StepDef::new("title", PropertyKind::Opacity, 0.0, 1.0)
            .at(At::Absolute(0.2))
            .duration(0.3),
    ]);
    assert_eq!(scalar(&compute_state(&tl, 0.1), "title", PropertyKind::Opacity), 0.0);
    let mid = scalar(&compute_state(&tl, 0.35), "title", PropertyKind::Opacity);
    assert!((mid - 0.5).abs() < 1e-9);
    assert_eq!(scalar(&compute_state(&tl, 0.9), "title", PropertyKind::Opacity), 1.0);
}

#[test]
fn touching_boundary_belongs_to_later_step() {
    let tl = build(vec![
        StepDef::new("card", PropertyKind::TranslateY, 0.0, 100.0)
            .at(At::Absolute(0.0))
            .duration(0.5),
        StepDef::new("card", PropertyKind::TranslateY, 500.0, 900.0)
            .at(At::Absolute(0.5))
            .duration(0.5),
    ]);
    assert_eq!(scalar(&compute_state(&tl, 0.5), "card", PropertyKind::TranslateY), 500.0);
    let just_before = scalar(&compute_state(&tl, 0.4999999), "card", PropertyKind::TranslateY);
    assert!((just_before - 100.0).abs() < 1e-3);
    assert_eq!(scalar(&compute_state(&tl, 1.0), "card", PropertyKind::TranslateY), 900.0);
}

#[test]
fn gap_between_steps_holds_previous_end_value() {
    let tl = build(vec![
        StepDef::new("a", PropertyKind::Scale, 1.0, 2.0)
            .at(At::Absolute(0.0))
            .duration(0.2),
        StepDef::new("a", PropertyKind::Scale, 2.0, 3.0)
            .at(At::Absolute(0.6))
            .duration(0.2),
    ]);
    assert_eq!(scalar(&compute_state(&tl, 0.4), "a", PropertyKind::Scale), 2.0);
}

#[test]
fn easing_shapes_local_time() {
    let tl = build(vec![
        StepDef::new("a", PropertyKind::Opacity, 0.0, 1.0)
            .at(At::Absolute(0.0))
            .duration(1.0)
            .ease(Ease::InQuad),
    ]);
    assert!((scalar(&compute_state(&tl, 0.5), "a", PropertyKind::Opacity) - 0.25).abs() < 1e-12);
}

#[test]
fn color_and_clip_inset_interpolate() {
    let tl = build(vec![
        StepDef::new(
            "bg",
            PropertyKind::BackgroundColor,
            Rgba8::new(0, 0, 0, 255),
            Rgba8::new(200, 100, 50, 255),
        )
        .at(At::Absolute(0.0))
        .duration(1.0),
        StepDef::new(
            "img",
            PropertyKind::ClipInset,
            Value::Inset(crate::foundation::core::Insets::new(0.0, 400.0, 0.0, 0.0)),
            Value::Inset(crate::foundation::core::Insets::new(0.0, 0.0, 0.0, 0.0)),
        )
        .at(At::Absolute(0.0))
        .duration(1.0),
    ]);
    let s = compute_state(&tl, 0.5);
    assert_eq!(
        s.get(&TargetId::new("bg"), PropertyKind::BackgroundColor),
        Some(Value::Color(Rgba8::new(100, 50, 25, 255)))
    );
    let Some(Value::Inset(clip)) = s.get(&TargetId::new("img"), PropertyKind::ClipInset) else {
        panic!("expected inset");
    };
    assert_eq!(clip.y0, 200.0);
}

#[test]
fn apply_is_idempotent() {
    let tl = build(vec![
        StepDef::new("a", PropertyKind::Opacity, 0.0, 1.0).duration(0.5),
        StepDef::new("b", PropertyKind::Rotate, 0.0, 90.0).duration(0.5),
    ]);
    for i in 0..=20 {
        let p = i as f64 / 20.0;
        assert_eq!(compute_state(&tl, p), compute_state(&tl, p));

        let mut first = RecordingSink::new();
        let mut second = RecordingSink::new();
        apply(&tl, p, &mut first);
        apply(&tl, p, &mut second);
        apply(&tl, p, &mut second);
        for track in tl.tracks() {
            assert_eq!(
                first.style(track.target(), track.property()),
                second.style(track.target(), track.property())
            );
        }
    }
}

#[test]
fn detached_targets_are_skipped_without_error() {
    let tl = build(vec![
        StepDef::new("a", PropertyKind::Opacity, 0.0, 1.0).duration(0.5),
        StepDef::new("b", PropertyKind::Opacity, 0.0, 1.0).duration(0.5),
    ]);
    let mut sink = RecordingSink::new();
    sink.detach("b");
    let stats = apply(&tl, 0.5, &mut sink);
    assert_eq!(stats, CommitStats { written: 1, detached: 1 });
    assert!(sink.style(&TargetId::new("b"), PropertyKind::Opacity).is_none());
}

#[test]
fn release_clears_every_override() {
    let tl = build(vec![
        StepDef::new("a", PropertyKind::Opacity, 0.0, 1.0).duration(0.5),
        StepDef::new("a", PropertyKind::Scale, 1.0, 2.0).at(At::WithPrevious(0.0)).duration(0.5),
    ]);
    let mut sink = RecordingSink::new();
    apply(&tl, 0.3, &mut sink);
    assert_eq!(sink.residual_overrides(), 2);
    release(&tl, &mut sink);
    assert_eq!(sink.residual_overrides(), 0);
}

#[test]
fn out_of_range_progress_is_clamped() {
    let tl = build(vec![StepDef::new("a", PropertyKind::Opacity, 0.0, 1.0).duration(1.0)]);
    assert_eq!(compute_state(&tl, -3.0).progress, 0.0);
    assert_eq!(compute_state(&tl, 7.0).progress, 1.0);
    assert_eq!(compute_state(&tl, f64::NAN).progress, 0.0);
}

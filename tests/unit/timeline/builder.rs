use super::*;
use crate::animation::value::Value;

fn vp() -> Size {
    Size::new(1280.0, 800.0)
}

fn opacity(target: &str, from: f64, to: f64) -> StepDef {
    StepDef::new(target, PropertyKind::Opacity, from, to)
}

#[test]
fn absolute_offsets_are_kept_and_sorted() {
    let tl = TimelineBuilder::new()
        .step(opacity("b", 0.0, 1.0).at(At::Absolute(0.5)).duration(0.2))
        .step(opacity("a", 0.0, 1.0).at(At::Absolute(0.1)).duration(0.2))
        .build(vp())
        .unwrap();
    let starts: Vec<f64> = tl.steps().iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0.1, 0.5]);
    assert_eq!(tl.tracks().len(), 2);
    assert_eq!(tl.tracks()[0].target().as_str(), "a");
}

#[test]
fn relative_positions_chain_from_previous_step() {
    let tl = TimelineBuilder::new()
        .step(opacity("a", 0.0, 1.0).at(At::Absolute(0.1)).duration(0.2))
        .step(opacity("b", 0.0, 1.0).duration(0.3))
        .step(opacity("c", 0.0, 1.0).at(At::WithPrevious(0.1)).duration(0.1))
        .step(opacity("d", 0.0, 1.0).at(At::AfterPrevious(-0.05)).duration(0.1))
        .build(vp())
        .unwrap();
    let by_target = |id: &str| {
        tl.steps()
            .iter()
            .find(|s| s.target.as_str() == id)
            .unwrap()
            .start
    };
    assert!((by_target("b") - 0.3).abs() < 1e-12);
    assert!((by_target("c") - 0.4).abs() < 1e-12);
    assert!((by_target("d") - 0.45).abs() < 1e-12);
}

#[test]
fn stagger_spaces_targets_by_each() {
    let tl = TimelineBuilder::new()
        .stagger(
            ["w0", "w1", "w2"],
            opacity("", 0.0, 1.0).at(At::Absolute(0.2)).duration(0.4),
            0.1,
        )
        .build(vp())
        .unwrap();
    let starts: Vec<(String, f64)> = tl
        .steps()
        .iter()
        .map(|s| (s.target.to_string(), s.start))
        .collect();
    assert_eq!(starts[0].0, "w0");
    assert!((starts[1].1 - 0.3).abs() < 1e-12);
    assert!((starts[2].1 - 0.4).abs() < 1e-12);
}

#[test]
fn overlapping_steps_on_one_track_are_rejected() {
    let err = TimelineBuilder::new()
        .step(opacity("a", 0.0, 1.0).at(At::Absolute(0.0)).duration(0.5))
        .step(opacity("a", 1.0, 0.0).at(At::Absolute(0.4)).duration(0.2))
        .build(vp())
        .unwrap_err();
    assert!(matches!(err, ScrubError::OverlappingSteps { .. }));
    assert!(err.is_configuration());
}

#[test]
fn explicit_override_allows_overlap() {
    let tl = TimelineBuilder::new()
        .step(opacity("a", 0.0, 1.0).at(At::Absolute(0.0)).duration(0.5))
        .step(
            opacity("a", 1.0, 0.0)
                .at(At::Absolute(0.4))
                .duration(0.2)
                .overrides(true),
        )
        .build(vp())
        .unwrap();
    assert_eq!(tl.tracks()[0].steps.len(), 2);
}

#[test]
fn nested_override_does_not_hide_a_later_overlap() {
    let err = TimelineBuilder::new()
        .step(opacity("a", 0.0, 1.0).at(At::Absolute(0.0)).duration(0.8))
        .step(
            opacity("a", 1.0, 0.5)
                .at(At::Absolute(0.1))
                .duration(0.1)
                .overrides(true),
        )
        .step(opacity("a", 0.5, 0.0).at(At::Absolute(0.3)).duration(0.2))
        .build(vp())
        .unwrap_err();
    match err {
        ScrubError::OverlappingSteps {
            a_start,
            a_end,
            b_start,
            ..
        } => {
            assert_eq!((a_start, b_start), (0.0, 0.3));
            assert!((a_end - 0.8).abs() < 1e-12);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn three_step_track_accepts_declared_overrides_and_touching_steps() {
    let tl = TimelineBuilder::new()
        .step(opacity("a", 0.0, 1.0).at(At::Absolute(0.0)).duration(0.8))
        .step(
            opacity("a", 1.0, 0.5)
                .at(At::Absolute(0.1))
                .duration(0.1)
                .overrides(true),
        )
        .step(
            opacity("a", 0.5, 0.0)
                .at(At::Absolute(0.3))
                .duration(0.2)
                .overrides(true),
        )
        .step(opacity("a", 0.0, 1.0).at(At::Absolute(0.8)).duration(0.2))
        .build(vp())
        .unwrap();
    assert_eq!(tl.tracks()[0].steps.len(), 4);
}

#[test]
fn touching_steps_and_other_tracks_do_not_overlap() {
    let tl = TimelineBuilder::new()
        .step(opacity("a", 0.0, 1.0).at(At::Absolute(0.0)).duration(0.5))
        .step(opacity("a", 1.0, 0.0).duration(0.5))
        .step(
            StepDef::new("a", PropertyKind::Scale, 1.0, 2.0)
                .at(At::Absolute(0.2))
                .duration(0.5),
        )
        .build(vp())
        .unwrap();
    assert_eq!(tl.steps().len(), 3);
}

#[test]
fn bad_offsets_and_durations_are_configuration_errors() {
    let cases = [
        opacity("a", 0.0, 1.0).at(At::Absolute(-0.1)).duration(0.1),
        opacity("a", 0.0, 1.0).at(At::Absolute(1.5)).duration(0.1),
        opacity("a", 0.0, 1.0).at(At::Absolute(0.0)).duration(0.0),
        opacity("a", 0.0, 1.0).at(At::Absolute(0.0)).duration(f64::NAN),
        opacity("a", 0.0, 1.0).at(At::Absolute(0.8)).duration(0.5),
    ];
    for def in cases {
        let err = TimelineBuilder::new().step(def.clone()).build(vp()).unwrap_err();
        assert!(err.is_configuration(), "{def:?}");
    }
}

#[test]
fn running_past_end_requires_flag() {
    let tl = TimelineBuilder::new()
        .step(
            opacity("a", 0.0, 1.0)
                .at(At::Absolute(0.8))
                .duration(0.5)
                .runs_past_end(true),
        )
        .build(vp())
        .unwrap();
    assert!((tl.end() - 1.3).abs() < 1e-12);
}

#[test]
fn value_kind_must_match_property() {
    let err = TimelineBuilder::new()
        .step(StepDef::new(
            "a",
            PropertyKind::Color,
            Value::Scalar(0.0),
            Value::Scalar(1.0),
        ))
        .build(vp())
        .unwrap_err();
    assert!(err.to_string().contains("property expects Color"));
}

#[test]
fn viewport_relative_values_resolve_at_build_time() {
    let step = StepDef::new(
        "panel",
        PropertyKind::TranslateX,
        ValueDef::Scalar(crate::animation::value::Length::Vw { vw: 100.0 }),
        0.0,
    );
    let narrow = TimelineBuilder::new().step(step.clone()).build(Size::new(400.0, 800.0)).unwrap();
    let wide = TimelineBuilder::new().step(step).build(Size::new(1600.0, 800.0)).unwrap();
    assert_eq!(narrow.steps()[0].from, Value::Scalar(400.0));
    assert_eq!(wide.steps()[0].from, Value::Scalar(1600.0));
}

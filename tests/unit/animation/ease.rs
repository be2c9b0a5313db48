use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InOutSine,
    Ease::OutExpo,
    Ease::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    },
];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-1.0), ease.apply(0.0));
        assert_eq!(ease.apply(2.0), ease.apply(1.0));
    }
}

#[test]
fn easings_are_monotonic() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=200 {
            let v = ease.apply(i as f64 / 200.0);
            assert!(v + 1e-9 >= prev, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn linear_bezier_matches_linear() {
    let ease = Ease::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((ease.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn bezier_validation_rejects_out_of_range_points() {
    let bad = Ease::CubicBezier {
        x1: 1.5,
        y1: 0.0,
        x2: 0.5,
        y2: 1.0,
    };
    assert!(bad.validate().unwrap_err().is_configuration());
    assert!(Ease::OutCubic.validate().is_ok());
}

#[test]
fn deserializes_unit_and_struct_variants() {
    let e: Ease = serde_json::from_str("\"OutCubic\"").unwrap();
    assert_eq!(e, Ease::OutCubic);
    let e: Ease =
        serde_json::from_str(r#"{"CubicBezier":{"x1":0.4,"y1":0.0,"x2":0.2,"y2":1.0}}"#).unwrap();
    assert!(matches!(e, Ease::CubicBezier { .. }));
}

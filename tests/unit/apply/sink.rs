use super::*;

#[test]
fn tracks_live_overrides_and_log() {
    let mut sink = RecordingSink::new();
    let a = TargetId::new("a");
    sink.set_property(&a, PropertyKind::Opacity, Value::Scalar(0.5));
    sink.set_property(&a, PropertyKind::Opacity, Value::Scalar(0.75));
    assert_eq!(sink.style(&a, PropertyKind::Opacity), Some(Value::Scalar(0.75)));
    assert_eq!(sink.residual_overrides(), 1);
    assert_eq!(sink.writes().len(), 2);

    sink.clear_property(&a, PropertyKind::Opacity);
    assert_eq!(sink.residual_overrides(), 0);
    assert_eq!(sink.take_writes().len(), 3);
    assert!(sink.writes().is_empty());
}

#[test]
fn detached_targets_ignore_writes() {
    let mut sink = RecordingSink::new();
    sink.detach("gone");
    let gone = TargetId::new("gone");
    assert!(!sink.is_mounted(&gone));
    sink.set_property(&gone, PropertyKind::Scale, Value::Scalar(2.0));
    assert_eq!(sink.residual_overrides(), 0);
    sink.attach(&gone);
    assert!(sink.is_mounted(&gone));
}

#[test]
fn pins_and_placeholders_count_as_residue() {
    let mut sink = RecordingSink::new();
    let p = TargetId::new("panel");
    sink.insert_placeholder(&p, Size::new(100.0, 50.0));
    sink.pin(&p, Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(sink.residual_overrides(), 2);
    sink.unpin(&p);
    sink.remove_placeholder(&p);
    assert_eq!(sink.residual_overrides(), 0);
    // Redundant removals are not logged.
    sink.unpin(&p);
    assert_eq!(sink.writes().len(), 4);
}

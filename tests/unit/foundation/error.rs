use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrubError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        ScrubError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn overlapping_steps_is_a_configuration_error() {
    let err = ScrubError::OverlappingSteps {
        target: TargetId::new("title"),
        property: PropertyKind::Opacity,
        a_start: 0.0,
        a_end: 0.5,
        b_start: 0.4,
        b_end: 0.8,
    };
    assert!(err.is_configuration());
    let msg = err.to_string();
    assert!(msg.contains("configuration error:"));
    assert!(msg.contains("'title'.opacity"));
    assert!(!ScrubError::serde("x").is_configuration());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrubError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

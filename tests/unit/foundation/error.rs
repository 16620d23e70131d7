use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PolishError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        PolishError::asset_unavailable("x")
            .to_string()
            .contains("asset unavailable:")
    );
    assert!(
        PolishError::serialization("x")
            .to_string()
            .contains("serialization failure:")
    );
    assert_eq!(PolishError::NoImageLoaded.to_string(), "no image loaded");
}

#[test]
fn anyhow_errors_are_wrapped_transparently() {
    let err: PolishError = anyhow::anyhow!("disk on fire").into();
    assert_eq!(err.to_string(), "disk on fire");
}

use super::*;
use crate::foundation::core::{Edges, PixelSize};

#[test]
fn builtins_are_registered_in_sorted_order() {
    let reg = FrameRegistry::with_builtins();
    let keys: Vec<_> = reg.keys().collect();
    assert_eq!(keys, ["browser_window", "laptop", "none", "phone"]);
}

#[test]
fn unknown_key_is_invalid_input_listing_known_keys() {
    let reg = FrameRegistry::default();
    let err = reg.get("tablet").err().unwrap();
    match err {
        PolishError::InvalidInput(msg) => {
            assert!(msg.contains("tablet"));
            assert!(msg.contains("laptop"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

struct Wide;

impl FrameRenderer for Wide {
    fn margins(&self, _image: PixelSize) -> Edges {
        Edges::new(1, 2, 3, 4)
    }
}

#[test]
fn register_replaces_and_returns_previous() {
    let mut reg = FrameRegistry::empty();
    assert!(reg.get("none").is_err());
    assert!(reg.register("custom", Arc::new(Wide)).is_none());
    assert!(reg.register("custom", Arc::new(NoFrame)).is_some());
    let m = reg.get("custom").unwrap().margins(PixelSize::new(1, 1).unwrap());
    assert_eq!(m, Edges::ZERO);
}

#[test]
fn register_skin_validates_geometry() {
    let spec: SkinSpec = serde_json::from_value(serde_json::json!({
        "name": "broken",
        "path": "/nowhere/skin.png",
        "asset_width": 10,
        "asset_height": 10,
        "screen": [0, 0, 0, 5]
    }))
    .unwrap();
    let mut reg = FrameRegistry::with_builtins();
    assert!(reg.register_skin(&spec).is_err());
    assert!(reg.get("broken").is_err());
}

#[test]
fn registered_skin_exposes_its_asset_slot() {
    let dir = std::env::temp_dir().join(format!("shotpolish-regskin-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("frame.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20"><rect width="20" height="20"/></svg>"#,
    )
    .unwrap();
    let spec: SkinSpec = serde_json::from_value(serde_json::json!({
        "name": "square",
        "path": dir.join("frame.svg"),
        "asset_width": 20,
        "asset_height": 20,
        "screen": [2, 2, 16, 16]
    }))
    .unwrap();

    let mut reg = FrameRegistry::with_builtins();
    reg.register_skin(&spec).unwrap();
    assert!(reg.get("square").is_ok());
    assert_eq!(reg.skin_asset("square").unwrap().label(), spec.path.display().to_string());

    reg.register("square", Arc::new(NoFrame));
    assert!(reg.skin_asset("square").is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

use std::time::{Duration, Instant};

use super::*;

fn wait_settled(slot: &AssetSlot) {
    assert!(slot.wait_timeout(Duration::from_secs(10)), "slot never settled");
}

#[test]
fn pending_slot_reports_asset_unavailable() {
    let slot = AssetSlot::pending("skin");
    assert!(matches!(slot.get(), Err(PolishError::AssetUnavailable(_))));
    assert!(!slot.is_settled());

    let img = SourceImage::from_rgba8(1, 1, vec![0, 0, 0, 255]).unwrap();
    assert!(slot.fill(Ok(img.clone())));
    assert!(!slot.fill(Ok(img)));
    assert_eq!(slot.get().unwrap().width(), 1);
}

#[test]
fn clones_observe_the_same_load() {
    let a = AssetSlot::pending("shared");
    let b = a.clone();
    a.fill(SourceImage::from_rgba8(2, 1, vec![0; 8]));
    assert!(b.is_settled());
    assert_eq!(b.get().unwrap().width(), 2);
}

#[test]
fn background_load_of_missing_file_settles_as_unavailable() {
    let slot = AssetSlot::load_in_background("/definitely/not/here.png");
    wait_settled(&slot);
    let err = slot.get().unwrap_err();
    assert!(matches!(err, PolishError::AssetUnavailable(ref m) if m.contains("failed to load")));
    assert!(format!("{slot:?}").contains("failed"));
}

#[test]
fn background_load_decodes_svg_from_disk() {
    let dir = std::env::temp_dir().join(format!("shotpolish-slot-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("skin.svg");
    std::fs::write(
        &path,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="3" height="5"><rect width="3" height="5"/></svg>"#,
    )
    .unwrap();

    let slot = AssetSlot::load_in_background(&path);
    wait_settled(&slot);
    let img = slot.get().unwrap();
    assert_eq!((img.width(), img.height()), (3, 5));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn wait_timeout_gives_up_on_a_pending_slot() {
    let slot = AssetSlot::pending("never");
    let start = Instant::now();
    assert!(!slot.wait_timeout(Duration::from_millis(20)));
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn wait_timeout_wakes_when_another_thread_fills() {
    let slot = AssetSlot::pending("late");
    let filler = slot.clone();
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(10));
        filler.fill(SourceImage::from_rgba8(1, 1, vec![255; 4]))
    });
    assert!(slot.wait_timeout(Duration::from_secs(10)));
    assert!(handle.join().unwrap());
    assert_eq!(slot.get().unwrap().width(), 1);
}

use rover_core::Blackboard;

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let mut bb = Blackboard::new();
    assert!(!bb.contains("count"));

    bb.set("count", 123u32);
    bb.set("target", "kitchen".to_string());

    assert_eq!(bb.get::<u32>("count").copied(), Some(123));
    assert_eq!(bb.get::<String>("target").map(|s| s.as_str()), Some("kitchen"));

    assert_eq!(bb.remove::<u32>("count"), Some(123));
    assert_eq!(bb.get::<u32>("count"), None);
}

#[test]
fn blackboard_absence_is_distinct_from_falsy() {
    let mut bb = Blackboard::new();
    bb.set("fault", false);

    assert!(bb.contains("fault"));
    assert_eq!(bb.get::<bool>("fault").copied(), Some(false));
    assert!(!bb.contains("other_fault"));
    assert_eq!(bb.get::<bool>("other_fault"), None);
}

#[test]
fn blackboard_missing_config_key_falls_back_to_default() {
    let bb = Blackboard::new();
    assert_eq!(bb.get_or("target_limit", 3u32), 3);

    let mut bb = Blackboard::new();
    bb.set("target_limit", 5u32);
    assert_eq!(bb.get_or("target_limit", 3u32), 5);
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn blackboard_type_mismatch_panics() {
    let mut bb = Blackboard::new();
    bb.set("count", 1u32);
    let _ = bb.get::<i32>("count");
}

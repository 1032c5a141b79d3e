use groovecore::core::hash::hash_canonical;
use groovecore::profile::GrooveProfile;
use groovecore::{compute_groove_hash, stable_stringify};
use serde_json::Value;

#[test]
fn key_order_does_not_change_the_canonical_form() {
    let a: Value = serde_json::from_str(
        r#"{"bpm": 92.0, "drag_curve": {"enabled": true, "max_drag_ms": 14.0}, "feel_bias": "laid_back"}"#,
    )
    .expect("parse a");
    let b: Value = serde_json::from_str(
        r#"{"feel_bias": "laid_back", "drag_curve": {"max_drag_ms": 14.0, "enabled": true}, "bpm": 92.0}"#,
    )
    .expect("parse b");

    assert_eq!(stable_stringify(&a), stable_stringify(&b));
    assert_eq!(hash_canonical(&a), hash_canonical(&b));
}

#[test]
fn profile_hash_is_64_lowercase_hex() {
    let h = compute_groove_hash(&GrooveProfile::default()).expect("hash");
    assert_eq!(h.len(), 64);
    assert!(h
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn profile_hash_survives_a_serialization_round_trip() {
    let profile = groovecore::presets::boom_bap();
    let h1 = compute_groove_hash(&profile).expect("hash");
    let json = profile.to_json_string().expect("serialize");
    let back = GrooveProfile::from_json_str(&json).expect("parse");
    let h2 = compute_groove_hash(&back).expect("hash");
    assert_eq!(h1, h2);
}

#[test]
fn bpm_change_changes_the_hash() {
    let mut profile = GrooveProfile::default();
    let before = compute_groove_hash(&profile).expect("hash");
    profile.bpm = 120.0;
    let after = compute_groove_hash(&profile).expect("hash");
    assert_ne!(before, after);
}

#[test]
fn every_emotion_dimension_is_hash_sensitive() {
    let base = compute_groove_hash(&GrooveProfile::default()).expect("hash");
    let tweaks: [fn(&mut GrooveProfile); 5] = [
        |p| p.emotion_vector.loneliness = 0.01,
        |p| p.emotion_vector.tension = 0.01,
        |p| p.emotion_vector.admiration = 0.01,
        |p| p.emotion_vector.defiance = 0.01,
        |p| p.emotion_vector.calm = 0.01,
    ];
    for tweak in tweaks {
        let mut p = GrooveProfile::default();
        tweak(&mut p);
        assert_ne!(base, compute_groove_hash(&p).expect("hash"));
    }
}

#[test]
fn scattered_numeric_fields_are_hash_sensitive() {
    let base = compute_groove_hash(&GrooveProfile::default()).expect("hash");
    let tweaks: [fn(&mut GrooveProfile); 6] = [
        |p| p.groove_amount = 0.99,
        |p| p.randomization_seed = 1,
        |p| p.steps_per_bar = 32,
        |p| p.drag_curve.max_drag_ms = 19.0,
        |p| p.hardware_emulation.ppqn = 96,
        |p| p.phrase_constraints.max_accumulated_phase_error_ms = 1.0,
    ];
    let mut seen = vec![base];
    for tweak in tweaks {
        let mut p = GrooveProfile::default();
        tweak(&mut p);
        let h = compute_groove_hash(&p).expect("hash");
        assert!(!seen.contains(&h));
        seen.push(h);
    }
}

use groovecore::core::field::DriftMode;
use groovecore::core::kernel::FeelBias;
use groovecore::engine::apply_groove;
use groovecore::profile::GrooveProfile;

fn drag_profile(mode: DriftMode, max_drag_ms: f64) -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 90.0;
    p.feel_bias = FeelBias::LaidBack;
    p.drag_curve.enabled = true;
    p.drag_curve.drift_mode = mode;
    p.drag_curve.max_drag_ms = max_drag_ms;
    p.drag_curve.drag_exponent = 1.25;
    p.drag_curve.log_k = 4.0;
    p.drag_curve
        .per_channel_scaling
        .insert("snare".to_string(), 1.0);
    p
}

#[test]
fn power_curve_reaches_full_drag_at_bar_end() {
    let profile = drag_profile(DriftMode::Power, 25.0);
    // At 90 bpm the tempo scalar is 1, the laid_back drag limit admits the
    // full 25 ms, so the event lands exactly 25 ms late.
    let ev = apply_groove(0.5, 16, "snare", Some(&profile), 0, None, "minor", 0.7);
    assert!((ev.time_seconds - 0.525).abs() < 1e-12, "t={}", ev.time_seconds);
}

#[test]
fn power_curve_is_silent_at_bar_start() {
    let profile = drag_profile(DriftMode::Power, 25.0);
    let ev = apply_groove(0.5, 0, "snare", Some(&profile), 0, None, "minor", 0.7);
    assert_eq!(ev.time_seconds, 0.5);
}

#[test]
fn log_drift_hits_both_endpoints() {
    let profile = drag_profile(DriftMode::Log, 20.0);
    let start = apply_groove(1.0, 0, "snare", Some(&profile), 0, None, "minor", 0.7);
    assert_eq!(start.time_seconds, 1.0);
    let end = apply_groove(1.0, 16, "snare", Some(&profile), 0, None, "minor", 0.7);
    assert!((end.time_seconds - 1.020).abs() < 1e-12, "t={}", end.time_seconds);
}

#[test]
fn feel_bias_caps_the_drag() {
    // laid_back admits at most +25 ms; a 60 ms curve saturates there.
    let profile = drag_profile(DriftMode::Power, 60.0);
    let ev = apply_groove(0.5, 16, "snare", Some(&profile), 0, None, "minor", 0.7);
    assert!((ev.time_seconds - 0.525).abs() < 1e-12);
}

#[test]
fn unscaled_channels_default_to_unity() {
    let mut profile = drag_profile(DriftMode::Power, 10.0);
    profile.drag_curve.per_channel_scaling.clear();
    let ev = apply_groove(0.5, 16, "kick", Some(&profile), 0, None, "minor", 0.7);
    assert!((ev.time_seconds - 0.510).abs() < 1e-12);
}

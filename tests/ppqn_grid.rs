use groovecore::engine::apply_groove;
use groovecore::hardware::ppqn::round_to_ppqn;
use groovecore::profile::{ChannelOffsets, GrooveProfile};

#[test]
fn scheduled_time_lands_on_a_pulse() {
    let mut profile = GrooveProfile::default();
    profile.bpm = 90.0;
    profile.hardware_emulation.ppqn = 96;
    profile.channel_offsets.insert(
        "kick".to_string(),
        ChannelOffsets {
            timing_offset_ms: 3.0,
            ..ChannelOffsets::default()
        },
    );

    // 3 ms sits mid-pulse on the 96-ppqn grid at 90 bpm (one pulse is
    // 1/144 s), so the rounding must move the event onto the grid.
    let ev = apply_groove(0.5, 4, "kick", Some(&profile), 0, None, "minor", 0.9);
    let pulse = 60.0 / (90.0 * 96.0);
    let pulses = ev.time_seconds / pulse;
    assert!(
        (pulses - pulses.round()).abs() < 1e-9,
        "t={} pulses={pulses}",
        ev.time_seconds
    );
    assert_ne!(ev.time_seconds, 0.503);
}

#[test]
fn pulse_rounding_is_idempotent_through_the_scheduler() {
    let mut profile = GrooveProfile::default();
    profile.bpm = 90.0;
    profile.hardware_emulation.ppqn = 96;

    for i in 0..64 {
        let grid = f64::from(i) * 0.0731;
        let ev = apply_groove(grid, i % 16, "kick", Some(&profile), i / 16, None, "minor", 0.9);
        let again = round_to_ppqn(ev.time_seconds, profile.bpm, 96);
        assert_eq!(ev.time_seconds.to_bits(), again.to_bits(), "grid={grid}");
    }
}

#[test]
fn zero_ppqn_disables_quantization() {
    let mut profile = GrooveProfile::default();
    profile.hardware_emulation.ppqn = 0;
    profile.channel_offsets.insert(
        "kick".to_string(),
        ChannelOffsets {
            timing_offset_ms: 3.0,
            ..ChannelOffsets::default()
        },
    );
    let ev = apply_groove(0.5, 4, "kick", Some(&profile), 0, None, "minor", 0.9);
    assert!((ev.time_seconds - 0.503).abs() < 1e-12);
}

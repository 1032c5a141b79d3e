//! Factory groove profiles for twelve named feels.
//!
//! Presets are pure data. The engine never looks at a preset's name; every
//! difference between, say, boom bap and techno lives in these coefficient
//! values and flows through the same kernel.

use std::collections::BTreeMap;

use crate::core::emotion::EmotionVector;
use crate::core::field::{CouplingDirection, DriftMode, DriftWaveform};
use crate::core::kernel::FeelBias;
use crate::profile::{ChannelOffsets, GrooveProfile};

pub const PRESET_NAMES: [&str; 12] = [
    "boom_bap",
    "trap",
    "drill",
    "swing",
    "funk",
    "house",
    "techno",
    "dnb",
    "reggae",
    "afrobeat",
    "samba",
    "lofi",
];

/// Look up a factory profile by name.
pub fn by_name(name: &str) -> Option<GrooveProfile> {
    match name {
        "boom_bap" => Some(boom_bap()),
        "trap" => Some(trap()),
        "drill" => Some(drill()),
        "swing" => Some(swing()),
        "funk" => Some(funk()),
        "house" => Some(house()),
        "techno" => Some(techno()),
        "dnb" => Some(dnb()),
        "reggae" => Some(reggae()),
        "afrobeat" => Some(afrobeat()),
        "samba" => Some(samba()),
        "lofi" => Some(lofi()),
        _ => None,
    }
}

fn channel(
    timing_offset_ms: f64,
    velocity_variance: f64,
    jitter_ms: f64,
    ghost_note_probability: f64,
    ghost_note_attenuation_db: f64,
) -> ChannelOffsets {
    ChannelOffsets {
        timing_offset_ms,
        velocity_variance,
        jitter_ms,
        ghost_note_probability,
        ghost_note_attenuation_db,
    }
}

fn offsets(entries: &[(&str, ChannelOffsets)]) -> BTreeMap<String, ChannelOffsets> {
    entries
        .iter()
        .map(|(name, c)| ((*name).to_string(), *c))
        .collect()
}

fn scaling(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, s)| ((*name).to_string(), *s))
        .collect()
}

fn gravity(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    scaling(entries)
}

/// Dusty mid-90s MPC feel: the snare lands fat and late, hats shuffle, and
/// the 96-pulse grid of the era coarsens everything.
pub fn boom_bap() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 92.0;
    p.feel_bias = FeelBias::LaidBack;
    p.randomization_seed = 9_201;
    p.channel_offsets = offsets(&[
        ("kick", channel(0.0, 0.04, 1.0, 0.0, 0.0)),
        ("snare", channel(11.0, 0.06, 1.5, 0.18, -14.0)),
        ("hihat", channel(4.0, 0.10, 2.2, 0.0, 0.0)),
        ("bass", channel(6.0, 0.03, 0.8, 0.0, 0.0)),
        ("keys", channel(8.0, 0.05, 1.2, 0.0, 0.0)),
    ]);
    p.drag_curve.enabled = true;
    p.drag_curve.drift_mode = DriftMode::Power;
    p.drag_curve.max_drag_ms = 14.0;
    p.drag_curve.drag_exponent = 1.25;
    p.drag_curve.per_channel_scaling = scaling(&[("snare", 1.0), ("hihat", 0.6), ("kick", 0.3)]);
    p.temporal_coupling.enabled = true;
    p.temporal_coupling.velocity_phase_ratio = 0.4;
    p.hardware_emulation.ppqn = 96;
    p.hardware_emulation.dac_saturation.enabled = true;
    p.emotion_vector = EmotionVector {
        loneliness: 0.3,
        calm: 0.4,
        ..EmotionVector::default()
    };
    p
}

/// Machine-tight half-time; only the hats breathe.
pub fn trap() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 140.0;
    p.feel_bias = FeelBias::OnTop;
    p.randomization_seed = 1_403;
    p.channel_offsets = offsets(&[
        ("kick", channel(0.0, 0.02, 0.0, 0.0, 0.0)),
        ("snare", channel(2.0, 0.03, 0.5, 0.0, 0.0)),
        ("hihat", channel(0.0, 0.12, 1.8, 0.25, -10.0)),
        ("bass", channel(0.0, 0.0, 0.0, 0.0, 0.0)),
    ]);
    p.temporal_coupling.enabled = true;
    p.temporal_coupling.velocity_phase_ratio = 0.2;
    p.emotion_vector = EmotionVector {
        tension: 0.5,
        defiance: 0.6,
        ..EmotionVector::default()
    };
    p
}

/// Trap's colder cousin: everything leans forward of the beat.
pub fn drill() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 142.0;
    p.feel_bias = FeelBias::Ahead;
    p.randomization_seed = 1_421;
    p.channel_offsets = offsets(&[
        ("kick", channel(-3.0, 0.02, 0.4, 0.0, 0.0)),
        ("snare", channel(-2.0, 0.04, 0.6, 0.0, 0.0)),
        ("hihat", channel(-4.0, 0.10, 1.5, 0.15, -9.0)),
        ("bass", channel(-6.0, 0.02, 0.5, 0.0, 0.0)),
    ]);
    p.macro_drift.enabled = true;
    p.macro_drift.amplitude_ms = 3.0;
    p.macro_drift.period_bars = 4.0;
    p.emotion_vector = EmotionVector {
        tension: 0.7,
        defiance: 0.8,
        ..EmotionVector::default()
    };
    p
}

/// Ride-led jazz time: logarithmic drift into the bar, loud notes dragged,
/// strong tonal gravity.
pub fn swing() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 120.0;
    p.feel_bias = FeelBias::LaidBack;
    p.randomization_seed = 3_303;
    p.channel_offsets = offsets(&[
        ("kick", channel(2.0, 0.08, 2.0, 0.0, 0.0)),
        ("snare", channel(6.0, 0.12, 2.5, 0.30, -16.0)),
        ("hihat", channel(3.0, 0.10, 1.8, 0.0, 0.0)),
        ("bass", channel(4.0, 0.06, 1.5, 0.0, 0.0)),
        ("keys", channel(5.0, 0.10, 2.0, 0.0, 0.0)),
    ]);
    p.drag_curve.enabled = true;
    p.drag_curve.drift_mode = DriftMode::Log;
    p.drag_curve.max_drag_ms = 18.0;
    p.drag_curve.log_k = 4.0;
    p.drag_curve.per_channel_scaling = scaling(&[("snare", 1.0), ("hihat", 0.8), ("keys", 0.7)]);
    p.temporal_coupling.enabled = true;
    p.temporal_coupling.velocity_phase_ratio = 0.7;
    p.harmonic_gravity.enabled = true;
    p.harmonic_gravity.gravity_by_mode =
        gravity(&[("major", 1.2), ("minor", 1.35), ("dorian", 1.5), ("mixolydian", 1.3)]);
    p.temporal_state.enabled = true;
    p.temporal_state.tension_increment = 0.15;
    p.temporal_state.elasticity_amplification = 0.5;
    p.emotion_vector = EmotionVector {
        admiration: 0.6,
        calm: 0.3,
        ..EmotionVector::default()
    };
    p
}

/// The one: pushed, punchy, ghost-heavy snare work.
pub fn funk() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 105.0;
    p.feel_bias = FeelBias::OnTop;
    p.randomization_seed = 1_975;
    p.channel_offsets = offsets(&[
        ("kick", channel(-2.0, 0.05, 0.8, 0.0, 0.0)),
        ("snare", channel(1.0, 0.10, 1.2, 0.40, -13.0)),
        ("hihat", channel(-1.0, 0.12, 1.5, 0.20, -11.0)),
        ("bass", channel(-3.0, 0.06, 1.0, 0.0, 0.0)),
        ("keys", channel(0.0, 0.08, 1.0, 0.0, 0.0)),
    ]);
    p.temporal_coupling.enabled = true;
    p.temporal_coupling.velocity_phase_ratio = 0.8;
    p.emotion_vector = EmotionVector {
        defiance: 0.4,
        admiration: 0.3,
        ..EmotionVector::default()
    };
    p
}

/// Four on the floor with late open hats; otherwise grid-faithful.
pub fn house() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 124.0;
    p.feel_bias = FeelBias::OnTop;
    p.randomization_seed = 1_240;
    p.channel_offsets = offsets(&[
        ("kick", channel(0.0, 0.02, 0.0, 0.0, 0.0)),
        ("snare", channel(1.0, 0.04, 0.6, 0.0, 0.0)),
        ("hihat", channel(7.0, 0.08, 1.0, 0.0, 0.0)),
        ("bass", channel(0.0, 0.03, 0.4, 0.0, 0.0)),
        ("keys", channel(2.0, 0.05, 0.8, 0.0, 0.0)),
    ]);
    p.macro_drift.enabled = true;
    p.macro_drift.amplitude_ms = 2.0;
    p.macro_drift.period_bars = 16.0;
    p.emotion_vector = EmotionVector {
        calm: 0.5,
        admiration: 0.2,
        ..EmotionVector::default()
    };
    p
}

/// Relentless and nearly quantized; a sub-millisecond wobble keeps it alive.
pub fn techno() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 132.0;
    p.feel_bias = FeelBias::OnTop;
    p.randomization_seed = 3_030;
    p.channel_offsets = offsets(&[
        ("kick", channel(0.0, 0.01, 0.3, 0.0, 0.0)),
        ("snare", channel(0.0, 0.02, 0.4, 0.0, 0.0)),
        ("hihat", channel(-1.0, 0.05, 0.7, 0.0, 0.0)),
        ("bass", channel(0.0, 0.01, 0.2, 0.0, 0.0)),
    ]);
    p.hardware_emulation.ppqn = 24;
    p.emotion_vector = EmotionVector {
        tension: 0.4,
        ..EmotionVector::default()
    };
    p
}

/// Breakbeat urgency: drums race ahead while the bass sits.
pub fn dnb() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 174.0;
    p.feel_bias = FeelBias::Ahead;
    p.randomization_seed = 1_740;
    p.channel_offsets = offsets(&[
        ("kick", channel(-4.0, 0.05, 1.0, 0.0, 0.0)),
        ("snare", channel(-5.0, 0.07, 1.4, 0.22, -12.0)),
        ("hihat", channel(-6.0, 0.10, 1.8, 0.0, 0.0)),
        ("bass", channel(2.0, 0.02, 0.5, 0.0, 0.0)),
    ]);
    p.temporal_coupling.enabled = true;
    p.temporal_coupling.velocity_phase_ratio = 0.5;
    p.temporal_coupling.direction = CouplingDirection::Inverted;
    p.emotion_vector = EmotionVector {
        tension: 0.6,
        defiance: 0.3,
        ..EmotionVector::default()
    };
    p
}

/// One-drop weight: everything sinks deep behind the beat and the whole
/// band breathes over an eight-bar arc.
pub fn reggae() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 75.0;
    p.feel_bias = FeelBias::DeepPocket;
    p.randomization_seed = 7_500;
    p.channel_offsets = offsets(&[
        ("kick", channel(8.0, 0.05, 1.0, 0.0, 0.0)),
        ("snare", channel(14.0, 0.08, 1.6, 0.12, -15.0)),
        ("hihat", channel(10.0, 0.09, 1.4, 0.0, 0.0)),
        ("bass", channel(16.0, 0.04, 0.8, 0.0, 0.0)),
        ("keys", channel(12.0, 0.07, 1.2, 0.0, 0.0)),
    ]);
    p.drag_curve.enabled = true;
    p.drag_curve.drift_mode = DriftMode::Power;
    p.drag_curve.max_drag_ms = 20.0;
    p.drag_curve.drag_exponent = 1.6;
    p.drag_curve.per_channel_scaling = scaling(&[("bass", 1.0), ("snare", 0.8), ("keys", 0.6)]);
    p.macro_drift.enabled = true;
    p.macro_drift.amplitude_ms = 5.0;
    p.macro_drift.period_bars = 8.0;
    p.emotion_vector = EmotionVector {
        calm: 0.8,
        ..EmotionVector::default()
    };
    p
}

/// Interlocked and circular; tension builds across four-bar cells.
pub fn afrobeat() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 110.0;
    p.feel_bias = FeelBias::LaidBack;
    p.randomization_seed = 1_100;
    p.channel_offsets = offsets(&[
        ("kick", channel(3.0, 0.06, 1.2, 0.0, 0.0)),
        ("snare", channel(5.0, 0.09, 1.6, 0.25, -12.0)),
        ("hihat", channel(2.0, 0.11, 1.8, 0.0, 0.0)),
        ("bass", channel(4.0, 0.05, 1.0, 0.0, 0.0)),
        ("keys", channel(3.0, 0.08, 1.4, 0.0, 0.0)),
    ]);
    p.drag_curve.enabled = true;
    p.drag_curve.drift_mode = DriftMode::Linear;
    p.drag_curve.max_drag_ms = 8.0;
    p.drag_curve.per_channel_scaling = scaling(&[("snare", 1.0), ("hihat", 0.7)]);
    p.temporal_state.enabled = true;
    p.temporal_state.tension_increment = 0.25;
    p.temporal_state.elasticity_amplification = 0.8;
    p.temporal_state.reset_period_bars = 4;
    p.harmonic_gravity.enabled = true;
    p.harmonic_gravity.gravity_by_mode = gravity(&[("dorian", 1.4), ("mixolydian", 1.3)]);
    p.emotion_vector = EmotionVector {
        admiration: 0.5,
        defiance: 0.2,
        ..EmotionVector::default()
    };
    p
}

/// Batucada push: the ensemble rides the front edge with a triangle surge.
pub fn samba() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 100.0;
    p.feel_bias = FeelBias::Ahead;
    p.randomization_seed = 2_020;
    p.channel_offsets = offsets(&[
        ("kick", channel(-3.0, 0.07, 1.4, 0.0, 0.0)),
        ("snare", channel(-5.0, 0.10, 1.8, 0.35, -11.0)),
        ("hihat", channel(-4.0, 0.12, 2.0, 0.0, 0.0)),
        ("bass", channel(-2.0, 0.05, 1.0, 0.0, 0.0)),
    ]);
    p.macro_drift.enabled = true;
    p.macro_drift.amplitude_ms = 4.0;
    p.macro_drift.period_bars = 2.0;
    p.macro_drift.waveform = DriftWaveform::Triangle;
    p.temporal_coupling.enabled = true;
    p.temporal_coupling.velocity_phase_ratio = 0.6;
    p.emotion_vector = EmotionVector {
        tension: 0.3,
        admiration: 0.4,
        ..EmotionVector::default()
    };
    p
}

/// Tape-warped bedroom haze: wide jitter, heavy pocket, the full sampler
/// chain with crackle-era converters.
pub fn lofi() -> GrooveProfile {
    let mut p = GrooveProfile::default();
    p.bpm = 82.0;
    p.feel_bias = FeelBias::DeepPocket;
    p.randomization_seed = 8_208;
    p.channel_offsets = offsets(&[
        ("kick", channel(5.0, 0.08, 2.5, 0.0, 0.0)),
        ("snare", channel(13.0, 0.10, 3.0, 0.15, -16.0)),
        ("hihat", channel(9.0, 0.14, 3.5, 0.0, 0.0)),
        ("bass", channel(7.0, 0.05, 1.5, 0.0, 0.0)),
        ("keys", channel(11.0, 0.09, 2.8, 0.0, 0.0)),
    ]);
    p.drag_curve.enabled = true;
    p.drag_curve.drift_mode = DriftMode::Power;
    p.drag_curve.max_drag_ms = 22.0;
    p.drag_curve.drag_exponent = 1.1;
    p.drag_curve.per_channel_scaling = scaling(&[("snare", 1.0), ("keys", 0.8), ("hihat", 0.6)]);
    p.macro_drift.enabled = true;
    p.macro_drift.amplitude_ms = 7.0;
    p.macro_drift.period_bars = 8.0;
    p.phrase_constraints.max_accumulated_phase_error_ms = 30.0;
    p.hardware_emulation.ppqn = 96;
    p.hardware_emulation.sample_rate = 26_040.0;
    p.hardware_emulation.bit_depth = 12;
    p.hardware_emulation.dac_saturation.enabled = true;
    p.hardware_emulation.dac_saturation.gain = 1.4;
    p.emotion_vector = EmotionVector {
        loneliness: 0.7,
        calm: 0.6,
        ..EmotionVector::default()
    };
    p
}

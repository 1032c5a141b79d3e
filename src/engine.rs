//! Context assembly and per-event scheduling.
//!
//! `apply_groove` is the per-event hook the outer sequencer calls at
//! scheduling time. It resolves the canonical channel, assembles a
//! coefficient context from the profile and musical state, passes it through
//! the emotional bias layer, evaluates the displacement kernel, then applies
//! the velocity-side humanization and the hardware pulse grid.
//!
//! Every feature activates from its own numeric or boolean gate; nothing in
//! this module inspects a genre tag. RNG consumption order per event is
//! fixed (jitter gaussian, velocity gaussian, ghost uniform) so equal seeds
//! reproduce bit-identical streams.

use crate::core::emotion::apply_emotional_bias;
use crate::core::field;
use crate::core::field::DriftMode;
use crate::core::kernel::{displacement, CoeffContext};
use crate::core::rng::GrooveRng;
use crate::hardware::ppqn::round_to_ppqn;
use crate::profile::GrooveProfile;

/// Lowest velocity the humanizer will produce; keeps a humanized hit audible.
const VELOCITY_FLOOR: f64 = 0.05;

/// One scheduled hit after grooving. `should_play` stays true for ghost
/// notes, which sound quietly rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    pub time_seconds: f64,
    pub velocity: f64,
    pub should_play: bool,
}

impl ScheduledEvent {
    fn passthrough(time_seconds: f64, velocity: f64) -> Self {
        Self {
            time_seconds,
            velocity,
            should_play: true,
        }
    }
}

/// Collapse a specific hit name to its groove bucket. Canonical names map to
/// themselves; anything unrecognized is returned as-is and will fall back to
/// the all-zero channel configuration.
pub fn canonical_channel(channel_id: &str) -> &str {
    match channel_id {
        "kick" | "tom" => "kick",
        "snare" | "clap" => "snare",
        "hihat" | "hihat_closed" | "hihat_open" | "rim" | "crash" => "hihat",
        "bass" => "bass",
        "keys" | "piano" | "strings" | "lead" | "pluck" => "keys",
        other => other,
    }
}

/// Build the kernel's coefficient context for one event. Every displacement
/// quantity is left unscaled; the kernel applies the tempo scalar once.
pub fn assemble_context(
    profile: &GrooveProfile,
    step_index: u32,
    channel_id: &str,
    bar_index: u32,
    rng: Option<&mut GrooveRng>,
    scale_mode: &str,
    base_velocity: f64,
) -> CoeffContext {
    let channel = profile.channel(canonical_channel(channel_id));

    let curvature = if profile.drag_curve.enabled {
        let drag = &profile.drag_curve;
        let scale = drag
            .per_channel_scaling
            .get(canonical_channel(channel_id))
            .copied()
            .unwrap_or(1.0);
        let exponent = if profile.temporal_state.enabled {
            drag.drag_exponent
                * field::tension_multiplier(
                    profile.temporal_state.tension_increment,
                    profile.temporal_state.elasticity_amplification,
                    profile.temporal_state.reset_period_bars,
                    bar_index,
                )
        } else {
            drag.drag_exponent
        };
        match drag.drift_mode {
            DriftMode::Power => field::drag_power(
                step_index,
                profile.steps_per_bar,
                drag.max_drag_ms,
                exponent,
                scale,
                1.0,
            ),
            DriftMode::Log => field::drag_log(
                step_index,
                profile.steps_per_bar,
                drag.max_drag_ms,
                drag.log_k,
                scale,
                1.0,
            ),
            DriftMode::Linear => field::drag_linear(
                step_index,
                profile.steps_per_bar,
                drag.max_drag_ms,
                scale,
                1.0,
            ),
        }
    } else {
        0.0
    };

    let phase_coupling = if profile.temporal_coupling.enabled {
        field::velocity_phase(
            base_velocity,
            profile.temporal_coupling.velocity_phase_ratio,
            profile.temporal_coupling.direction,
        )
    } else {
        0.0
    };

    let harmonic_gravity = if profile.harmonic_gravity.enabled {
        field::harmonic_gravity(&profile.harmonic_gravity.gravity_by_mode, scale_mode)
    } else {
        1.0
    };

    let macro_drift = field::macro_drift(
        profile.macro_drift.enabled,
        profile.macro_drift.amplitude_ms,
        profile.macro_drift.period_bars,
        profile.macro_drift.waveform,
        bar_index,
        1.0,
    );

    // First RNG draw of the event.
    let jitter = match rng {
        Some(rng) if channel.jitter_ms > 0.0 => channel.jitter_ms * rng.gaussian(),
        _ => 0.0,
    };

    let (max_push_ms, max_drag_ms) = profile.feel_bias.limits();

    CoeffContext {
        bpm: profile.bpm,
        groove_amount: profile.amount(),
        linear_offset: channel.timing_offset_ms,
        curvature,
        phase_coupling,
        harmonic_gravity,
        macro_drift,
        jitter,
        max_push_ms,
        max_drag_ms,
        max_phase_error_ms: profile.phrase_constraints.max_accumulated_phase_error_ms,
    }
}

/// Per-event scheduling hook.
///
/// Pipeline order is fixed: assemble, emotional bias, kernel, velocity
/// humanization, ghost note, add to grid time, pulse rounding, clamp to
/// non-negative time. With no profile, a zero groove amount, or no RNG, the
/// affected stages degrade to identity.
#[allow(clippy::too_many_arguments)]
pub fn apply_groove(
    grid_time_seconds: f64,
    step_index: u32,
    channel_id: &str,
    profile: Option<&GrooveProfile>,
    bar_index: u32,
    mut rng: Option<&mut GrooveRng>,
    scale_mode: &str,
    base_velocity: f64,
) -> ScheduledEvent {
    let Some(profile) = profile else {
        return ScheduledEvent::passthrough(grid_time_seconds, base_velocity);
    };
    if profile.amount() == 0.0 {
        return ScheduledEvent::passthrough(grid_time_seconds, base_velocity);
    }

    let ctx = assemble_context(
        profile,
        step_index,
        channel_id,
        bar_index,
        rng.as_deref_mut(),
        scale_mode,
        base_velocity,
    );
    let ctx = apply_emotional_bias(ctx, Some(&profile.emotion_vector));
    let displacement_ms = displacement(&ctx);

    let channel = profile.channel(canonical_channel(channel_id));
    let mut velocity = base_velocity;

    // Second draw: velocity humanization.
    if let Some(rng) = rng.as_deref_mut() {
        if channel.velocity_variance > 0.0 {
            velocity = (base_velocity + channel.velocity_variance * rng.gaussian())
                .clamp(VELOCITY_FLOOR, 1.0);
        }
    }

    // Third draw: ghost notes, attenuated from the unhumanized velocity.
    if let Some(rng) = rng.as_deref_mut() {
        if channel.ghost_note_probability > 0.0 && rng.uniform() < channel.ghost_note_probability {
            velocity = base_velocity * 10.0_f64.powf(channel.ghost_note_attenuation_db / 20.0);
        }
    }

    let mut time_seconds = grid_time_seconds + displacement_ms / 1000.0;

    // Pulse rounding is strictly last, then the result may not precede zero.
    if profile.hardware_emulation.ppqn > 0 {
        time_seconds = round_to_ppqn(time_seconds, profile.bpm, profile.hardware_emulation.ppqn);
    }
    time_seconds = time_seconds.max(0.0);

    ScheduledEvent {
        time_seconds,
        velocity,
        should_play: true,
    }
}

/// Transport-facing scheduler. Owns the RNG and the step/bar counters; the
/// bar index advances exactly when the step index wraps to zero.
#[derive(Debug, Clone)]
pub struct GrooveEngine {
    profile: GrooveProfile,
    rng: GrooveRng,
    step_index: u32,
    bar_index: u32,
}

impl GrooveEngine {
    pub fn new(profile: GrooveProfile) -> Self {
        let rng = GrooveRng::new(profile.randomization_seed);
        Self {
            profile,
            rng,
            step_index: 0,
            bar_index: 0,
        }
    }

    pub fn profile(&self) -> &GrooveProfile {
        &self.profile
    }

    /// Replace the profile. Counters and RNG are left alone; edits during
    /// playback take effect from the next event.
    pub fn set_profile(&mut self, profile: GrooveProfile) {
        self.profile = profile;
    }

    /// Rewind to the top: seed the RNG from the profile and zero the
    /// counters. Called at transport start and at the start of every
    /// offline render, which is what makes renders bit-reproducible.
    pub fn transport_start(&mut self) {
        self.rng.reset(self.profile.randomization_seed);
        self.step_index = 0;
        self.bar_index = 0;
    }

    pub fn step_index(&self) -> u32 {
        self.step_index
    }

    pub fn bar_index(&self) -> u32 {
        self.bar_index
    }

    /// Groove one event at the current step/bar, without advancing.
    pub fn schedule(
        &mut self,
        grid_time_seconds: f64,
        channel_id: &str,
        scale_mode: &str,
        base_velocity: f64,
    ) -> ScheduledEvent {
        apply_groove(
            grid_time_seconds,
            self.step_index,
            channel_id,
            Some(&self.profile),
            self.bar_index,
            Some(&mut self.rng),
            scale_mode,
            base_velocity,
        )
    }

    /// Move to the next step, rolling the bar over at `steps_per_bar`.
    pub fn advance(&mut self) {
        let steps_per_bar = self.profile.steps_per_bar.max(1);
        self.step_index += 1;
        if self.step_index >= steps_per_bar {
            self.step_index = 0;
            self.bar_index += 1;
        }
    }
}

//! hardware/ppqn.rs
//! Time-domain pulse quantization.
//!
//! Classic samplers schedule on a fixed pulses-per-quarter-note grid; timing
//! between pulses simply cannot exist on those machines. Rounding the final
//! event time to the nearest pulse reproduces that coarseness. This runs
//! strictly last in the per-event pipeline.

/// Round a time to the nearest PPQN pulse at the given tempo. Non-positive
/// `ppqn` or `bpm` passes the time through unchanged.
pub fn round_to_ppqn(t_seconds: f64, bpm: f64, ppqn: u32) -> f64 {
    if ppqn == 0 || bpm <= 0.0 {
        return t_seconds;
    }
    let pulse = 60.0 / (bpm * f64::from(ppqn));
    (t_seconds / pulse).round() * pulse
}

//! core/field.rs
//! Groove field basis functions.
//!
//! - Pure numeric helpers consumed by context assembly; each returns a
//!   displacement in milliseconds (or a dimensionless multiplier where noted).
//! - Every displacement-valued helper takes an explicit `bpm_scale`; the
//!   scheduling pipeline passes 1.0 so tempo scaling happens exactly once,
//!   inside the displacement kernel.
//! - Degenerate arguments (zero/negative bar counts, exponents, periods)
//!   yield 0 rather than NaN.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Velocity value treated as the neutral playing strength.
const COUPLING_CENTER: f64 = 0.7;
/// Milliseconds of displacement per unit of velocity deviation at ratio 1.
const COUPLING_SPREAD_MS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DriftMode {
    Power,
    Log,
    Linear,
}

impl Default for DriftMode {
    fn default() -> Self {
        Self::Power
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CouplingDirection {
    Natural,
    Inverted,
    None,
}

impl Default for CouplingDirection {
    fn default() -> Self {
        Self::Natural
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DriftWaveform {
    Sine,
    Triangle,
}

impl Default for DriftWaveform {
    fn default() -> Self {
        Self::Sine
    }
}

/// Power-curve drag: 0 at the bar start, `max_drag_ms * channel_scale` at the
/// bar end, shaped by the exponent in between.
pub fn drag_power(
    step: u32,
    steps_per_bar: u32,
    max_drag_ms: f64,
    exponent: f64,
    channel_scale: f64,
    bpm_scale: f64,
) -> f64 {
    if steps_per_bar == 0 || exponent <= 0.0 {
        return 0.0;
    }
    let progress = f64::from(step) / f64::from(steps_per_bar);
    max_drag_ms * progress.powf(exponent) * channel_scale * bpm_scale
}

/// Logarithmic drag: fast early drift that flattens toward the bar end.
/// Shares the power curve's endpoints (0 at step 0, `D * s` at the bar end).
pub fn drag_log(
    step: u32,
    steps_per_bar: u32,
    max_drag_ms: f64,
    log_k: f64,
    channel_scale: f64,
    bpm_scale: f64,
) -> f64 {
    if steps_per_bar == 0 {
        return 0.0;
    }
    let k = if log_k > 0.0 { log_k } else { 1.0 };
    let progress = f64::from(step) / f64::from(steps_per_bar);
    let shaped = (1.0 + progress * k).ln() / (1.0 + k).ln();
    max_drag_ms * shaped * channel_scale * bpm_scale
}

/// Straight-line drag across the bar.
pub fn drag_linear(
    step: u32,
    steps_per_bar: u32,
    max_drag_ms: f64,
    channel_scale: f64,
    bpm_scale: f64,
) -> f64 {
    if steps_per_bar == 0 {
        return 0.0;
    }
    let progress = f64::from(step) / f64::from(steps_per_bar);
    max_drag_ms * progress * channel_scale * bpm_scale
}

/// Velocity-phase coupling: hits played harder than the 0.7 center land late
/// (natural) or early (inverted), proportional to the deviation.
pub fn velocity_phase(velocity: f64, ratio: f64, direction: CouplingDirection) -> f64 {
    let sign = match direction {
        CouplingDirection::Natural => 1.0,
        CouplingDirection::Inverted => -1.0,
        CouplingDirection::None => return 0.0,
    };
    sign * (velocity - COUPLING_CENTER) * ratio * COUPLING_SPREAD_MS
}

/// Slow push/pull oscillation over `period_bars`. The triangle starts each
/// period at the trough (-A), peaks at the half period (+A) and returns.
pub fn macro_drift(
    enabled: bool,
    amplitude_ms: f64,
    period_bars: f64,
    waveform: DriftWaveform,
    bar: u32,
    bpm_scale: f64,
) -> f64 {
    if !enabled || period_bars <= 0.0 {
        return 0.0;
    }
    let phase = (f64::from(bar) / period_bars).rem_euclid(1.0);
    let value = match waveform {
        DriftWaveform::Sine => (TAU * phase).sin(),
        DriftWaveform::Triangle => 1.0 - 2.0 * (2.0 * phase - 1.0).abs(),
    };
    amplitude_ms * value * bpm_scale
}

/// Tension accumulated across a phrase, expressed as a multiplier for the
/// drag exponent. `tau` saturates at 1, so the multiplier never exceeds
/// `1 + amplification`.
pub fn tension_multiplier(
    increment: f64,
    amplification: f64,
    reset_period_bars: u32,
    bar: u32,
) -> f64 {
    if reset_period_bars == 0 {
        return 1.0;
    }
    let bar_in_phrase = bar % reset_period_bars;
    let tau = (f64::from(bar_in_phrase) * increment).clamp(0.0, 1.0);
    1.0 + tau * amplification
}

/// Gravity factor for a scale mode; unknown modes are neutral.
pub fn harmonic_gravity(gravity_by_mode: &BTreeMap<String, f64>, mode: &str) -> f64 {
    gravity_by_mode.get(mode).copied().unwrap_or(1.0).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_power_endpoints() {
        assert_eq!(drag_power(0, 16, 25.0, 1.25, 1.0, 1.0), 0.0);
        let end = drag_power(16, 16, 25.0, 1.25, 1.0, 1.0);
        assert!((end - 25.0).abs() < 1e-12);
    }

    #[test]
    fn drag_power_is_monotonic_over_the_bar() {
        let mut prev = -1.0;
        for step in 0..=16 {
            let v = drag_power(step, 16, 25.0, 2.0, 1.0, 1.0);
            assert!(v >= prev, "step={step} v={v} prev={prev}");
            prev = v;
        }
    }

    #[test]
    fn drag_power_degenerate_arguments_return_zero() {
        assert_eq!(drag_power(4, 0, 25.0, 1.25, 1.0, 1.0), 0.0);
        assert_eq!(drag_power(4, 16, 25.0, 0.0, 1.0, 1.0), 0.0);
        assert_eq!(drag_power(4, 16, 25.0, -1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn drag_log_endpoints() {
        assert_eq!(drag_log(0, 16, 20.0, 4.0, 1.0, 1.0), 0.0);
        let end = drag_log(16, 16, 20.0, 4.0, 1.0, 1.0);
        assert!((end - 20.0).abs() < 1e-12);
    }

    #[test]
    fn drag_log_bad_k_falls_back_to_one() {
        let bad = drag_log(8, 16, 20.0, 0.0, 1.0, 1.0);
        let one = drag_log(8, 16, 20.0, 1.0, 1.0, 1.0);
        assert_eq!(bad.to_bits(), one.to_bits());
    }

    #[test]
    fn drag_log_leads_power_mid_bar() {
        // Log drift front-loads the drag relative to a power curve with the
        // same endpoints.
        let log_mid = drag_log(8, 16, 20.0, 4.0, 1.0, 1.0);
        let pow_mid = drag_power(8, 16, 20.0, 1.25, 1.0, 1.0);
        assert!(log_mid > pow_mid);
    }

    #[test]
    fn drag_linear_is_proportional() {
        let quarter = drag_linear(4, 16, 20.0, 1.0, 1.0);
        assert!((quarter - 5.0).abs() < 1e-12);
    }

    #[test]
    fn velocity_phase_directions() {
        let late = velocity_phase(0.9, 0.5, CouplingDirection::Natural);
        let early = velocity_phase(0.9, 0.5, CouplingDirection::Inverted);
        assert!((late - 1.0).abs() < 1e-12);
        assert_eq!(late, -early);
        assert_eq!(velocity_phase(0.9, 0.5, CouplingDirection::None), 0.0);
        // At the center velocity there is no coupling either way.
        assert_eq!(velocity_phase(0.7, 0.5, CouplingDirection::Natural), 0.0);
    }

    #[test]
    fn macro_drift_sine_period() {
        let p = 8.0;
        assert!(macro_drift(true, 6.0, p, DriftWaveform::Sine, 0, 1.0).abs() < 1e-12);
        let quarter = macro_drift(true, 6.0, p, DriftWaveform::Sine, 2, 1.0);
        assert!((quarter - 6.0).abs() < 1e-9);
        let full = macro_drift(true, 6.0, p, DriftWaveform::Sine, 8, 1.0);
        assert!(full.abs() < 1e-9);
    }

    #[test]
    fn macro_drift_triangle_trough_to_peak() {
        let p = 8.0;
        let start = macro_drift(true, 6.0, p, DriftWaveform::Triangle, 0, 1.0);
        let half = macro_drift(true, 6.0, p, DriftWaveform::Triangle, 4, 1.0);
        assert!((start + 6.0).abs() < 1e-12, "start={start}");
        assert!((half - 6.0).abs() < 1e-12, "half={half}");
        let wrapped = macro_drift(true, 6.0, p, DriftWaveform::Triangle, 8, 1.0);
        assert!((wrapped + 6.0).abs() < 1e-12, "wrapped={wrapped}");
    }

    #[test]
    fn macro_drift_gates() {
        assert_eq!(macro_drift(false, 6.0, 8.0, DriftWaveform::Sine, 3, 1.0), 0.0);
        assert_eq!(macro_drift(true, 6.0, 0.0, DriftWaveform::Sine, 3, 1.0), 0.0);
        assert_eq!(macro_drift(true, 6.0, -2.0, DriftWaveform::Sine, 3, 1.0), 0.0);
    }

    #[test]
    fn tension_stays_in_unit_interval() {
        for bar in 0..64 {
            for &period in &[1_u32, 4, 8, 16] {
                let m = tension_multiplier(0.3, 2.0, period, bar);
                assert!((1.0..=3.0).contains(&m), "bar={bar} period={period} m={m}");
            }
        }
    }

    #[test]
    fn tension_resets_each_phrase() {
        let late = tension_multiplier(0.25, 1.0, 8, 7);
        let reset = tension_multiplier(0.25, 1.0, 8, 8);
        assert!(late > reset);
        assert_eq!(reset, tension_multiplier(0.25, 1.0, 8, 0));
    }

    #[test]
    fn tension_degenerate_period_is_identity() {
        assert_eq!(tension_multiplier(0.3, 2.0, 0, 5), 1.0);
    }

    #[test]
    fn gravity_lookup_defaults_to_neutral() {
        let mut map = BTreeMap::new();
        map.insert("minor".to_string(), 1.4);
        map.insert("broken".to_string(), 0.2);
        assert_eq!(harmonic_gravity(&map, "minor"), 1.4);
        assert_eq!(harmonic_gravity(&map, "lydian"), 1.0);
        // Sub-unity table entries are floored on read.
        assert_eq!(harmonic_gravity(&map, "broken"), 1.0);
    }
}

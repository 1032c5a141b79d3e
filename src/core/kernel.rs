//! core/kernel.rs
//! Unified displacement kernel.
//!
//! One closed-form equation turns an assembled coefficient context into a
//! signed time displacement in milliseconds. Twelve very different feels all
//! run through this same straight line of arithmetic; what separates them is
//! the coefficients, never a branch on a genre tag.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hard push/drag limits in milliseconds, selected by the profile's feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeelBias {
    OnTop,
    LaidBack,
    Ahead,
    DeepPocket,
}

impl FeelBias {
    /// (max_push_ms, max_drag_ms); push is negative (early), drag positive.
    pub fn limits(self) -> (f64, f64) {
        match self {
            FeelBias::OnTop => (-8.0, 8.0),
            FeelBias::LaidBack => (-5.0, 25.0),
            FeelBias::Ahead => (-20.0, 5.0),
            FeelBias::DeepPocket => (-3.0, 35.0),
        }
    }
}

impl Default for FeelBias {
    fn default() -> Self {
        Self::OnTop
    }
}

/// Everything the kernel consumes for one event. All displacement-like
/// fields are unscaled milliseconds; the kernel applies the tempo scalar
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoeffContext {
    pub bpm: f64,
    pub groove_amount: f64,
    pub linear_offset: f64,
    pub curvature: f64,
    pub phase_coupling: f64,
    pub harmonic_gravity: f64,
    pub macro_drift: f64,
    pub jitter: f64,
    pub max_push_ms: f64,
    pub max_drag_ms: f64,
    pub max_phase_error_ms: f64,
}

impl Default for CoeffContext {
    fn default() -> Self {
        let (max_push_ms, max_drag_ms) = FeelBias::OnTop.limits();
        Self {
            bpm: 90.0,
            groove_amount: 1.0,
            linear_offset: 0.0,
            curvature: 0.0,
            phase_coupling: 0.0,
            harmonic_gravity: 1.0,
            macro_drift: 0.0,
            jitter: 0.0,
            max_push_ms,
            max_drag_ms,
            max_phase_error_ms: 0.0,
        }
    }
}

/// Total displacement in milliseconds for one event.
///
/// Gravity amplifies only a positive elastic field (curvature + coupling);
/// the linear offset and macro drift pass through unamplified. The phrase
/// clamp applies only when a positive error budget is configured, and the
/// feel limits bound the result before the groove amount scales it.
pub fn displacement(ctx: &CoeffContext) -> f64 {
    if ctx.bpm <= 0.0 {
        return 0.0;
    }
    let beta = 90.0 / ctx.bpm;

    let elastic_raw = ctx.curvature + ctx.phase_coupling;
    let elastic = if elastic_raw > 0.0 {
        ctx.harmonic_gravity * elastic_raw
    } else {
        elastic_raw
    };

    let raw = beta * (ctx.linear_offset + elastic + ctx.macro_drift + ctx.jitter);

    let phrase_clamped = if ctx.max_phase_error_ms > 0.0 {
        let bound = ctx.max_phase_error_ms * beta;
        raw.clamp(-bound, bound)
    } else {
        raw
    };

    let bounded = phrase_clamped.clamp(ctx.max_push_ms * beta, ctx.max_drag_ms * beta);
    bounded * ctx.groove_amount
}

//! core/emotion.rs
//! Emotional field bias.
//!
//! A five-dimensional coefficient bias applied exactly once, between context
//! assembly and kernel evaluation. Each dimension contributes a fixed set of
//! deltas; the biased context is a weighted sum over the basis, so blended
//! emotions compose linearly and the layer never branches on an emotion name.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::kernel::CoeffContext;

/// Emotional intensity per dimension, each in [0, 1]. Values are clamped on
/// every read, so out-of-range profile data cannot leak into the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct EmotionVector {
    #[serde(default)]
    pub loneliness: f64,
    #[serde(default)]
    pub tension: f64,
    #[serde(default)]
    pub admiration: f64,
    #[serde(default)]
    pub defiance: f64,
    #[serde(default)]
    pub calm: f64,
}

impl EmotionVector {
    /// Basis-ordered intensities, clamped to [0, 1].
    pub fn clamped(&self) -> [f64; 5] {
        [
            self.loneliness.clamp(0.0, 1.0),
            self.tension.clamp(0.0, 1.0),
            self.admiration.clamp(0.0, 1.0),
            self.defiance.clamp(0.0, 1.0),
            self.calm.clamp(0.0, 1.0),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.clamped().iter().all(|&e| e == 0.0)
    }
}

/// Per-dimension coefficient deltas: an additive timing offset in ms, four
/// multiplicative scales, an additive gravity term and an additive groove
/// amount term.
#[derive(Debug, Clone, Copy)]
pub struct EmotionDeltas {
    pub offset_ms: f64,
    pub curvature_scale: f64,
    pub coupling_scale: f64,
    pub gravity_add: f64,
    pub drift_scale: f64,
    pub jitter_scale: f64,
    pub amount_add: f64,
}

/// Frozen delta table, ordered as the basis: loneliness, tension, admiration,
/// defiance, calm. Scale columns are balanced so the summed multipliers stay
/// inside [0, 3] for any vector.
pub const DELTA_TABLE: [EmotionDeltas; 5] = [
    // loneliness: hits sink behind the beat, drift widens, playing steadies
    EmotionDeltas {
        offset_ms: 3.0,
        curvature_scale: 0.25,
        coupling_scale: 0.10,
        gravity_add: 0.15,
        drift_scale: 0.20,
        jitter_scale: -0.10,
        amount_add: 0.10,
    },
    // tension: pushes ahead, couples harder to velocity, hands get shaky
    EmotionDeltas {
        offset_ms: -2.0,
        curvature_scale: -0.15,
        coupling_scale: 0.30,
        gravity_add: 0.10,
        drift_scale: -0.20,
        jitter_scale: 0.35,
        amount_add: 0.05,
    },
    // admiration: expressive dynamics, strong tonal pull
    EmotionDeltas {
        offset_ms: 0.5,
        curvature_scale: 0.10,
        coupling_scale: 0.25,
        gravity_add: 0.30,
        drift_scale: 0.10,
        jitter_scale: -0.15,
        amount_add: 0.05,
    },
    // defiance: on top of the beat, flattened curve, deliberate roughness
    EmotionDeltas {
        offset_ms: -3.0,
        curvature_scale: -0.30,
        coupling_scale: -0.20,
        gravity_add: -0.25,
        drift_scale: 0.15,
        jitter_scale: 0.40,
        amount_add: 0.15,
    },
    // calm: slight settle, slow breathing drift, very steady hands
    EmotionDeltas {
        offset_ms: 1.0,
        curvature_scale: 0.15,
        coupling_scale: -0.25,
        gravity_add: 0.20,
        drift_scale: 0.30,
        jitter_scale: -0.45,
        amount_add: -0.20,
    },
];

/// Bias a context by an emotion vector. `None` is the identity: the input
/// context comes back untouched. An all-zero vector leaves every field
/// numerically equal to its input.
pub fn apply_emotional_bias(ctx: CoeffContext, vector: Option<&EmotionVector>) -> CoeffContext {
    let Some(vector) = vector else {
        return ctx;
    };
    let e = vector.clamped();

    let mut offset = 0.0;
    let mut curvature = 0.0;
    let mut coupling = 0.0;
    let mut gravity = 0.0;
    let mut drift = 0.0;
    let mut jitter = 0.0;
    let mut amount = 0.0;
    for (weight, deltas) in e.iter().zip(DELTA_TABLE.iter()) {
        offset += weight * deltas.offset_ms;
        curvature += weight * deltas.curvature_scale;
        coupling += weight * deltas.coupling_scale;
        gravity += weight * deltas.gravity_add;
        drift += weight * deltas.drift_scale;
        jitter += weight * deltas.jitter_scale;
        amount += weight * deltas.amount_add;
    }

    CoeffContext {
        linear_offset: ctx.linear_offset + offset,
        curvature: ctx.curvature * (1.0 + curvature),
        phase_coupling: ctx.phase_coupling * (1.0 + coupling),
        harmonic_gravity: (ctx.harmonic_gravity + gravity).max(1.0),
        macro_drift: ctx.macro_drift * (1.0 + drift),
        jitter: ctx.jitter * (1.0 + jitter).max(0.0),
        groove_amount: (ctx.groove_amount + amount).clamp(0.0, 1.0),
        ..ctx
    }
}

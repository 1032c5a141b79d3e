//! Groove profile: the complete declarative description of a feel, plus the
//! beat-kernel envelope it travels in on disk.
//!
//! A profile is configuration. It is immutable during a render, copied on
//! edit, and hashed whole (the emotion vector included) for export/import
//! integrity. Unknown top-level keys are kept verbatim so older builds can
//! round-trip profiles written by newer ones.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::core::emotion::EmotionVector;
use crate::core::field::{CouplingDirection, DriftMode, DriftWaveform};
use crate::core::hash::compute_groove_hash;
use crate::core::kernel::FeelBias;

/// Fixed schema marker for the on-disk envelope. A mismatch is a fatal
/// import error; everything else about an envelope is forgiving.
pub const BEAT_KERNEL_SCHEMA: &str = "groovebox.beat-kernel.v1";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("beat kernel JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unrecognized beat kernel schema `{found}` (expected `{expected}`)")]
    SchemaMarker {
        expected: &'static str,
        found: String,
    },
}

/// Per-channel humanization settings. The all-zero default doubles as the
/// fallback for channels a profile does not configure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ChannelOffsets {
    #[serde(default)]
    pub timing_offset_ms: f64,
    #[serde(default)]
    pub velocity_variance: f64,
    #[serde(default)]
    pub jitter_ms: f64,
    #[serde(default)]
    pub ghost_note_probability: f64,
    #[serde(default)]
    pub ghost_note_attenuation_db: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DragCurve {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub drift_mode: DriftMode,
    #[serde(default = "DragCurve::default_max_drag_ms")]
    pub max_drag_ms: f64,
    #[serde(default = "DragCurve::default_drag_exponent")]
    pub drag_exponent: f64,
    #[serde(default = "DragCurve::default_log_k")]
    pub log_k: f64,
    #[serde(default)]
    pub per_channel_scaling: BTreeMap<String, f64>,
}

impl DragCurve {
    fn default_max_drag_ms() -> f64 {
        18.0
    }
    fn default_drag_exponent() -> f64 {
        1.5
    }
    fn default_log_k() -> f64 {
        4.0
    }
}

impl Default for DragCurve {
    fn default() -> Self {
        Self {
            enabled: false,
            drift_mode: DriftMode::default(),
            max_drag_ms: Self::default_max_drag_ms(),
            drag_exponent: Self::default_drag_exponent(),
            log_k: Self::default_log_k(),
            per_channel_scaling: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TemporalCoupling {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "TemporalCoupling::default_velocity_phase_ratio")]
    pub velocity_phase_ratio: f64,
    #[serde(default)]
    pub direction: CouplingDirection,
}

impl TemporalCoupling {
    fn default_velocity_phase_ratio() -> f64 {
        0.5
    }
}

impl Default for TemporalCoupling {
    fn default() -> Self {
        Self {
            enabled: false,
            velocity_phase_ratio: Self::default_velocity_phase_ratio(),
            direction: CouplingDirection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct HarmonicGravity {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub gravity_by_mode: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MacroDrift {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "MacroDrift::default_amplitude_ms")]
    pub amplitude_ms: f64,
    #[serde(default = "MacroDrift::default_period_bars")]
    pub period_bars: f64,
    #[serde(default)]
    pub waveform: DriftWaveform,
}

impl MacroDrift {
    fn default_amplitude_ms() -> f64 {
        6.0
    }
    fn default_period_bars() -> f64 {
        8.0
    }
}

impl Default for MacroDrift {
    fn default() -> Self {
        Self {
            enabled: false,
            amplitude_ms: Self::default_amplitude_ms(),
            period_bars: Self::default_period_bars(),
            waveform: DriftWaveform::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResetMode {
    Hard,
    Soft,
}

impl Default for ResetMode {
    fn default() -> Self {
        Self::Hard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PhraseConstraints {
    #[serde(default = "PhraseConstraints::default_phrase_length_bars")]
    pub phrase_length_bars: u32,
    #[serde(default)]
    pub reset_mode: ResetMode,
    /// 0 disables the extra phrase clamp.
    #[serde(default)]
    pub max_accumulated_phase_error_ms: f64,
}

impl PhraseConstraints {
    fn default_phrase_length_bars() -> u32 {
        4
    }
}

impl Default for PhraseConstraints {
    fn default() -> Self {
        Self {
            phrase_length_bars: Self::default_phrase_length_bars(),
            reset_mode: ResetMode::default(),
            max_accumulated_phase_error_ms: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TemporalState {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "TemporalState::default_tension_increment")]
    pub tension_increment: f64,
    #[serde(default = "TemporalState::default_elasticity_amplification")]
    pub elasticity_amplification: f64,
    #[serde(default = "TemporalState::default_reset_period_bars")]
    pub reset_period_bars: u32,
}

impl TemporalState {
    fn default_tension_increment() -> f64 {
        0.125
    }
    fn default_elasticity_amplification() -> f64 {
        0.6
    }
    fn default_reset_period_bars() -> u32 {
        8
    }
}

impl Default for TemporalState {
    fn default() -> Self {
        Self {
            enabled: false,
            tension_increment: Self::default_tension_increment(),
            elasticity_amplification: Self::default_elasticity_amplification(),
            reset_period_bars: Self::default_reset_period_bars(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SaturationCurve {
    Tanh,
    Soft,
}

impl Default for SaturationCurve {
    fn default() -> Self {
        Self::Tanh
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DacSaturation {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub curve: SaturationCurve,
    #[serde(default = "DacSaturation::default_gain")]
    pub gain: f64,
}

impl DacSaturation {
    fn default_gain() -> f64 {
        1.2
    }
}

impl Default for DacSaturation {
    fn default() -> Self {
        Self {
            enabled: false,
            curve: SaturationCurve::default(),
            gain: Self::default_gain(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AntiAliasType {
    OnePole,
    Butterworth,
    Chebyshev,
}

impl Default for AntiAliasType {
    fn default() -> Self {
        Self::OnePole
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AntiAliasFilter {
    #[serde(default, rename = "type")]
    pub filter_type: AntiAliasType,
    #[serde(default = "AntiAliasFilter::default_cutoff_hz")]
    pub cutoff_hz: f64,
    #[serde(default)]
    pub ripple_db: f64,
}

impl AntiAliasFilter {
    fn default_cutoff_hz() -> f64 {
        13_020.0
    }
}

impl Default for AntiAliasFilter {
    fn default() -> Self {
        Self {
            filter_type: AntiAliasType::default(),
            cutoff_hz: Self::default_cutoff_hz(),
            ripple_db: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HardwareEmulation {
    /// 0 disables pulse quantization.
    #[serde(default)]
    pub ppqn: u32,
    #[serde(default = "HardwareEmulation::default_sample_rate")]
    pub sample_rate: f64,
    #[serde(default = "HardwareEmulation::default_bit_depth")]
    pub bit_depth: u32,
    #[serde(default)]
    pub dac_saturation: DacSaturation,
    #[serde(default)]
    pub anti_alias_filter: AntiAliasFilter,
}

impl HardwareEmulation {
    fn default_sample_rate() -> f64 {
        26_040.0
    }
    fn default_bit_depth() -> u32 {
        12
    }
}

impl Default for HardwareEmulation {
    fn default() -> Self {
        Self {
            ppqn: 0,
            sample_rate: Self::default_sample_rate(),
            bit_depth: Self::default_bit_depth(),
            dac_saturation: DacSaturation::default(),
            anti_alias_filter: AntiAliasFilter::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrooveProfile {
    #[serde(default = "GrooveProfile::default_bpm")]
    pub bpm: f64,
    #[serde(default = "GrooveProfile::default_groove_amount")]
    pub groove_amount: f64,
    #[serde(default)]
    pub feel_bias: FeelBias,
    #[serde(default = "GrooveProfile::default_steps_per_bar")]
    pub steps_per_bar: u32,
    #[serde(default)]
    pub randomization_seed: u32,
    #[serde(default)]
    pub channel_offsets: BTreeMap<String, ChannelOffsets>,
    #[serde(default)]
    pub drag_curve: DragCurve,
    #[serde(default)]
    pub temporal_coupling: TemporalCoupling,
    #[serde(default)]
    pub harmonic_gravity: HarmonicGravity,
    #[serde(default)]
    pub macro_drift: MacroDrift,
    #[serde(default)]
    pub phrase_constraints: PhraseConstraints,
    #[serde(default)]
    pub temporal_state: TemporalState,
    #[serde(default)]
    pub hardware_emulation: HardwareEmulation,
    #[serde(default)]
    pub emotion_vector: EmotionVector,
    /// Keys this build does not know about, preserved for round-trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GrooveProfile {
    fn default_bpm() -> f64 {
        90.0
    }
    fn default_groove_amount() -> f64 {
        1.0
    }
    fn default_steps_per_bar() -> u32 {
        16
    }

    /// Groove amount, clamped to [0, 1] on every read.
    pub fn amount(&self) -> f64 {
        self.groove_amount.clamp(0.0, 1.0)
    }

    /// Channel settings for a canonical bucket, or the all-zero fallback.
    pub fn channel(&self, canonical: &str) -> ChannelOffsets {
        self.channel_offsets
            .get(canonical)
            .copied()
            .unwrap_or_default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for GrooveProfile {
    fn default() -> Self {
        Self {
            bpm: Self::default_bpm(),
            groove_amount: Self::default_groove_amount(),
            feel_bias: FeelBias::default(),
            steps_per_bar: Self::default_steps_per_bar(),
            randomization_seed: 0,
            channel_offsets: BTreeMap::new(),
            drag_curve: DragCurve::default(),
            temporal_coupling: TemporalCoupling::default(),
            harmonic_gravity: HarmonicGravity::default(),
            macro_drift: MacroDrift::default(),
            phrase_constraints: PhraseConstraints::default(),
            temporal_state: TemporalState::default(),
            hardware_emulation: HardwareEmulation::default(),
            emotion_vector: EmotionVector::default(),
            extra: Map::new(),
        }
    }
}

/// The on-disk envelope around a groove profile. Collaborator sections
/// (sequencer content, synth patches, mix state) pass through opaquely; this
/// crate only interprets the schema marker, the groove and the hash pair.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BeatKernel {
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub transport: Value,
    #[serde(default)]
    pub drums: Value,
    #[serde(default)]
    pub instruments: Value,
    #[serde(default)]
    pub master_fx: Value,
    #[serde(default)]
    pub arrangement: Value,
    #[serde(default)]
    pub groove: GrooveProfile,
    #[serde(default)]
    pub groove_hash: Option<String>,
    #[serde(default)]
    pub randomization_seed: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BeatKernel {
    pub fn new(groove: GrooveProfile) -> Self {
        Self {
            schema: BEAT_KERNEL_SCHEMA.to_string(),
            randomization_seed: groove.randomization_seed,
            groove,
            ..Self::default()
        }
    }
}

/// Outcome of the integrity check on import. A mismatch is a warning, never
/// a failure: the imported data wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashCheck {
    Verified,
    Mismatch { stored: String, computed: String },
    Missing,
}

#[derive(Debug, Clone)]
pub struct BeatKernelImport {
    pub kernel: BeatKernel,
    pub hash_check: HashCheck,
}

/// Parse an envelope. Malformed JSON and schema-marker mismatches are fatal;
/// a stored hash that disagrees with the recomputed one only warns.
pub fn import_beat_kernel(json: &str) -> Result<BeatKernelImport, ProfileError> {
    let kernel: BeatKernel = serde_json::from_str(json)?;
    if kernel.schema != BEAT_KERNEL_SCHEMA {
        return Err(ProfileError::SchemaMarker {
            expected: BEAT_KERNEL_SCHEMA,
            found: kernel.schema,
        });
    }

    let hash_check = match (&kernel.groove_hash, compute_groove_hash(&kernel.groove)) {
        (Some(stored), Some(computed)) if *stored == computed => HashCheck::Verified,
        (Some(stored), Some(computed)) => {
            warn!(
                stored = stored.as_str(),
                computed = computed.as_str(),
                "groove hash mismatch on import; keeping imported data"
            );
            HashCheck::Mismatch {
                stored: stored.clone(),
                computed,
            }
        }
        _ => HashCheck::Missing,
    };

    Ok(BeatKernelImport { kernel, hash_check })
}

/// Serialize an envelope, stamping the schema marker, the profile hash and
/// the seed mirror.
pub fn export_beat_kernel(kernel: &mut BeatKernel) -> Result<String, ProfileError> {
    kernel.schema = BEAT_KERNEL_SCHEMA.to_string();
    kernel.groove_hash = compute_groove_hash(&kernel.groove);
    kernel.randomization_seed = kernel.groove.randomization_seed;
    Ok(serde_json::to_string_pretty(kernel)?)
}

//! hardware/signal_chain.rs
//! Sampler signal-chain emulation.
//!
//! Runs inside the host's real-time audio callback on fixed-size blocks.
//! Per sample the stage order is a binding contract, mirroring the analog
//! path of the emulated hardware: DAC saturation, anti-alias one-pole,
//! sample-and-hold downsampling, bit-depth quantization, vinyl crackle,
//! dry/wet mix. State is owned per channel; nothing allocates in the hot
//! path.

use crate::core::rng::GrooveRng;

/// Seed for every channel's crackle generator. Fixed so offline renders of
/// the same material are sample-identical.
const CRACKLE_SEED: u32 = 0x9E37_79B9;

/// Per-sample crackle trigger probability at `crackle_amount == 1`.
const CRACKLE_RATE: f64 = 0.002;
/// Peak crackle amplitude at `crackle_amount == 1`.
const CRACKLE_LEVEL: f32 = 0.15;

/// Flat k-rate parameter block. Changes apply from the next processed
/// sample; the chain does not smooth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalChainParams {
    pub enabled: bool,
    pub saturation_enabled: bool,
    pub saturation_gain: f32,
    pub target_sample_rate: f32,
    pub bit_depth: u32,
    pub downsample_enabled: bool,
    pub crackle_amount: f32,
    pub dry_wet: f32,
}

impl Default for SignalChainParams {
    fn default() -> Self {
        Self {
            enabled: false,
            saturation_enabled: true,
            saturation_gain: 1.2,
            target_sample_rate: 26_040.0,
            bit_depth: 12,
            downsample_enabled: true,
            crackle_amount: 0.0,
            dry_wet: 1.0,
        }
    }
}

impl SignalChainParams {
    /// Derive a parameter block from a profile's hardware section. Crackle
    /// and dry/wet stay at their host-controlled defaults.
    pub fn from_hardware(hw: &crate::profile::HardwareEmulation) -> Self {
        Self {
            enabled: true,
            saturation_enabled: hw.dac_saturation.enabled,
            saturation_gain: hw.dac_saturation.gain as f32,
            target_sample_rate: hw.sample_rate as f32,
            bit_depth: hw.bit_depth,
            downsample_enabled: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ChannelState {
    lpf: f32,
    hold: f32,
    hold_count: u32,
    crackle_rng: GrooveRng,
}

impl ChannelState {
    fn new() -> Self {
        Self {
            lpf: 0.0,
            hold: 0.0,
            hold_count: 0,
            crackle_rng: GrooveRng::new(CRACKLE_SEED),
        }
    }
}

/// Block processor with per-channel persistent state. Construct once with
/// the host sample rate and channel count; call `process` from the audio
/// callback.
#[derive(Debug, Clone)]
pub struct SignalChain {
    params: SignalChainParams,
    fs_host: f32,
    channels: Vec<ChannelState>,
}

impl SignalChain {
    pub fn new(params: SignalChainParams, fs_host: f32, n_channels: usize) -> Self {
        Self {
            params,
            fs_host,
            channels: vec![ChannelState::new(); n_channels.max(1)],
        }
    }

    pub fn params(&self) -> &SignalChainParams {
        &self.params
    }

    /// Swap the parameter block. Channel state (filter memory, hold value,
    /// crackle stream) is deliberately left untouched across toggles.
    pub fn set_params(&mut self, params: SignalChainParams) {
        self.params = params;
    }

    /// Downsampling ratio implied by the current parameters; 1 means the
    /// hold stage is inert.
    fn ratio(&self) -> u32 {
        if self.params.target_sample_rate <= 0.0 || self.fs_host <= 0.0 {
            return 1;
        }
        ((self.fs_host / self.params.target_sample_rate).floor() as u32).max(1)
    }

    /// Process one block in place for the given channel. Out-of-range
    /// channel indices are ignored.
    pub fn process(&mut self, channel: usize, block: &mut [f32]) {
        if !self.params.enabled {
            return;
        }
        let p = self.params;
        let ratio = if p.downsample_enabled { self.ratio() } else { 1 };
        let alpha = if ratio > 1 {
            (std::f32::consts::PI * p.target_sample_rate / self.fs_host).min(1.0)
        } else {
            0.0
        };
        let Some(state) = self.channels.get_mut(channel) else {
            return;
        };
        let levels = if p.bit_depth >= 1 && p.bit_depth < 31 {
            (1_u32 << (p.bit_depth - 1)) as f32
        } else {
            0.0
        };
        let crackle = p.crackle_amount.clamp(0.0, 1.0);
        let wet = p.dry_wet.clamp(0.0, 1.0);

        for sample in block.iter_mut() {
            let dry = *sample;
            let mut x = dry;

            // 1. Analog-domain saturation, before anything samples it.
            if p.saturation_enabled {
                x = (p.saturation_gain * x).tanh();
            }

            // 2. Anti-alias, then decimate by holding.
            if ratio > 1 {
                state.lpf += alpha * (x - state.lpf);
                x = state.lpf;

                state.hold_count += 1;
                if state.hold_count >= ratio {
                    state.hold_count = 0;
                    state.hold = x;
                }
                x = state.hold;
            }

            // 3. Converter word length.
            if p.downsample_enabled && levels > 0.0 {
                x = (x * levels).round() / levels;
            }

            // 4. Surface noise.
            if crackle > 0.0 {
                let rate = f64::from(crackle) * CRACKLE_RATE;
                if state.crackle_rng.uniform() < rate {
                    let u = state.crackle_rng.uniform() as f32;
                    x += (u - 0.5) * crackle * CRACKLE_LEVEL;
                }
            }

            // 5. Blend against the captured dry sample.
            *sample = dry * (1.0 - wet) + x * wet;
        }
    }

    /// Convenience for non-interleaved stereo blocks.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.process(0, left);
        self.process(1, right);
    }
}

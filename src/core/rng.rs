//! core/rng.rs
//! Seeded PRNG for groove jitter, velocity humanization and ghost notes.
//!
//! - Mulberry32 over a 32-bit state: tiny, fast, and reproducible across
//!   platforms because it only uses wrapping integer arithmetic.
//! - One Box-Muller draw per `gaussian()` call (two consecutive uniforms).
//! - `reset` restores the state so a transport restart replays the exact
//!   same stream.

use std::f64::consts::TAU;

const MULBERRY_INC: u32 = 0x6D2B79F5;

#[derive(Clone, Copy, Debug)]
pub struct GrooveRng {
    state: u32,
}

impl GrooveRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn reset(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Uniform draw in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.state = self.state.wrapping_add(MULBERRY_INC);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }

    /// Standard-normal draw, consuming exactly two uniforms.
    pub fn gaussian(&mut self) -> f64 {
        // Floor u1 away from zero so ln() stays finite.
        let u1 = self.uniform().max(1e-10);
        let u2 = self.uniform();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

//! Deterministic groove engine.
//!
//! Transforms a quantized step-sequencer grid into a humanized event stream:
//! for every scheduled hit, a signed time displacement and a possibly-modified
//! velocity, computed by a single closed-form kernel. Feel differences between
//! profiles come entirely from coefficients; nothing in the pipeline branches
//! on a genre tag.
//!
//! Layers, leaves first:
//! - `core::field` — pure basis functions (drag curves, coupling, drift).
//! - `core::kernel` — the displacement equation over a coefficient context.
//! - `engine` — context assembly, per-event scheduling, RNG ownership.
//! - `core::emotion` — five-dimensional coefficient bias, injected once.
//! - `hardware` — PPQN time quantizer and the sampler signal chain.
//! - `core::rng` / `core::hash` — seeded randomness and profile integrity.

pub mod core;
pub mod engine;
pub mod hardware;
pub mod presets;
pub mod profile;

pub use crate::core::hash::{compute_groove_hash, stable_stringify};
pub use crate::core::kernel::CoeffContext;
pub use crate::core::rng::GrooveRng;
pub use crate::engine::{apply_groove, GrooveEngine, ScheduledEvent};
pub use crate::profile::{BeatKernel, GrooveProfile, ProfileError};

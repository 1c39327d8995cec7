//! The equalizer signal graph.
//!
//! A lazily created processing context holding a fixed three-node filter
//! chain (bass shelf, mid peak, treble shelf). The chain persists for the
//! lifetime of the engine; only the attached source changes.

mod filter;
mod manager;

#[cfg(test)]
mod tests;

pub use filter::{Band, FilterChain, MAX_GAIN_DB, MIN_GAIN_DB, clamp_gain};
pub use manager::{EqTap, EqualizerState, SignalGraph};

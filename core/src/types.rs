//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one simulated minute.
pub type Tick = u64;

/// A count of elapsed sols since the start of the run.
pub type Sol = u64;

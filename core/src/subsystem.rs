//! Subsystem trait.
//!
//! RULE: Every sub-model implements PlanetSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, every tick.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    error::SimResult,
    event::PlanetEvent,
    rng::EntropySource,
    state::PlanetState,
    types::Tick,
};

/// Values derived from the clock once per tick, after it has advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick:          Tick,
    /// Ls in degrees.
    pub phase_degrees: f64,
    /// Position within the current sol, [0, 1).
    pub day_fraction:  f64,
}

impl TickContext {
    pub fn phase_radians(&self) -> f64 {
        self.phase_degrees.to_radians()
    }
}

/// The contract every sub-model must fulfill.
pub trait PlanetSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `ctx`:   clock-derived values for this tick
    /// - `state`: the working copy of the planet state
    /// - `rng`:   the engine's single random stream
    ///
    /// Returns any events worth reporting.
    fn update(
        &mut self,
        ctx: &TickContext,
        state: &mut PlanetState,
        rng: &mut dyn EntropySource,
    ) -> SimResult<Vec<PlanetEvent>>;
}

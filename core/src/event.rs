//! Events emitted during a tick.
//!
//! State lives in PlanetState; events describe the transitions worth
//! reporting (storm onset/end, quakes, sol rollover) so callers do not
//! have to diff states to find them.

use crate::{
    state::Seismicity,
    types::{Sol, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanetEvent {
    // ── Engine events ──────────────────────────────
    RunInitialized {
        planet: String,
        /// None when the engine was built around a caller-supplied stream.
        seed:   Option<u64>,
    },
    TickStarted {
        tick: Tick,
    },
    TickCompleted {
        tick: Tick,
    },
    SolCompleted {
        tick: Tick,
        sol:  Sol,
    },

    /// End-of-tick reading of the continuous fields.
    ConditionsUpdated {
        tick:            Tick,
        temperature:     f64,
        pressure:        f64,
        wind_speed:      f64,
        dust:            f64,
        solar_radiation: f64,
        uv_radiation:    f64,
    },

    // ── Storm events ───────────────────────────────
    DustStormStarted {
        tick:      Tick,
        duration:  u32,
        intensity: f64,
    },
    DustStormEnded {
        tick: Tick,
    },

    // ── Seismic events ─────────────────────────────
    SeismicActivity {
        tick: Tick,
        tier: Seismicity,
    },
}

impl PlanetEvent {
    /// Stable string name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. }   => "run_initialized",
            Self::TickStarted { .. }      => "tick_started",
            Self::TickCompleted { .. }    => "tick_completed",
            Self::SolCompleted { .. }     => "sol_completed",
            Self::ConditionsUpdated { .. } => "conditions_updated",
            Self::DustStormStarted { .. } => "dust_storm_started",
            Self::DustStormEnded { .. }   => "dust_storm_ended",
            Self::SeismicActivity { .. }  => "seismic_activity",
        }
    }
}

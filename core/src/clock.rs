//! Martian clock: owns sol/hour/minute and the seasonal phase.

use crate::types::Sol;
use serde::{Deserialize, Serialize};

pub const SOLS_PER_YEAR:    u64 = 668;
pub const HOURS_PER_SOL:    f64 = 24.659722;
pub const MINUTES_PER_HOUR: f64 = 60.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarsClock {
    pub sol:    Sol,
    pub hour:   f64,
    pub minute: f64,
}

impl MarsClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at an arbitrary point. Used by tests and tooling.
    pub fn at(sol: Sol, hour: f64, minute: f64) -> Self {
        Self { sol, hour, minute }
    }

    /// Advance one tick (one minute). Returns true if the sol rolled over.
    pub fn advance_one_minute(&mut self) -> bool {
        self.minute += 1.0;
        if self.minute >= MINUTES_PER_HOUR {
            self.minute -= MINUTES_PER_HOUR;
            self.hour += 1.0;
        }
        if self.hour >= HOURS_PER_SOL {
            self.hour -= HOURS_PER_SOL;
            self.sol += 1;
            return true;
        }
        false
    }

    /// Areocentric solar longitude (Ls) in degrees, [0, 360).
    pub fn seasonal_phase_degrees(&self) -> f64 {
        let fraction = (self.sol % SOLS_PER_YEAR) as f64 / SOLS_PER_YEAR as f64;
        fraction * 360.0
    }

    /// Minutes elapsed since a zeroed clock, i.e. the number of ticks run.
    pub fn elapsed_minutes(&self) -> u64 {
        let hours = self.sol as f64 * HOURS_PER_SOL + self.hour;
        (hours * MINUTES_PER_HOUR + self.minute).round() as u64
    }

    /// Position within the current sol, [0, 1).
    pub fn day_fraction(&self) -> f64 {
        (self.hour + self.minute / MINUTES_PER_HOUR) / HOURS_PER_SOL
    }
}

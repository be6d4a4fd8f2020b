//! The planet state record — everything one tick reads and writes.

use crate::{clock::MarsClock, config::PlanetConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Seismicity {
    None,
    Weak,
    Medium,
    Strong,
}

impl Seismicity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None   => "none",
            Self::Weak   => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for Seismicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dust storm lifecycle. Duration and intensity only exist while active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum StormState {
    Calm,
    Active {
        /// Ticks left before the storm subsides.
        remaining_ticks: u32,
        /// Multiplier on storm dust gain and wind.
        intensity: f64,
    },
}

impl StormState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn remaining_ticks(&self) -> Option<u32> {
        match self {
            Self::Calm => None,
            Self::Active { remaining_ticks, .. } => Some(*remaining_ticks),
        }
    }

    pub fn intensity(&self) -> Option<f64> {
        match self {
            Self::Calm => None,
            Self::Active { intensity, .. } => Some(*intensity),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanetState {
    /// °C
    pub temperature:     f64,
    /// m/s
    pub wind_speed:      f64,
    /// hPa
    pub pressure:        f64,
    /// µg/m³
    pub dust:            f64,
    /// W/m²
    pub solar_radiation: f64,
    /// W/m²
    pub uv_radiation:    f64,
    pub seismicity:      Seismicity,
    pub storm:           StormState,
    pub clock:           MarsClock,
}

impl PlanetState {
    /// Baseline conditions at the start of a run.
    pub fn baseline(config: &PlanetConfig) -> Self {
        Self {
            temperature:     config.thermal.base_temp,
            wind_speed:      0.0,
            pressure:        config.thermal.base_pressure,
            dust:            config.dust.base_dust,
            solar_radiation: config.thermal.base_sun,
            uv_radiation:    config.thermal.base_uv,
            seismicity:      Seismicity::None,
            storm:           StormState::Calm,
            clock:           MarsClock::new(),
        }
    }

    pub fn is_dust_storm(&self) -> bool {
        self.storm.is_active()
    }

    /// One-line human-readable report.
    pub fn status_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlanetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sol {} {:05.2}h{:05.2}m Ls={:.1}° | temp {:.1}°C, wind {:.1} m/s, \
             press {:.3} hPa, dust {:.1} µg/m³, sun {:.1} W/m², uv {:.1} W/m², \
             seismicity {}, dust storm {}",
            self.clock.sol,
            self.clock.hour,
            self.clock.minute,
            self.clock.seasonal_phase_degrees(),
            self.temperature,
            self.wind_speed,
            self.pressure,
            self.dust,
            self.solar_radiation,
            self.uv_radiation,
            self.seismicity,
            if self.storm.is_active() { "yes" } else { "no" },
        )
    }
}

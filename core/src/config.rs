//! Planet parameters.
//!
//! `PlanetConfig::default()` is Mars. `PlanetConfig::load()` reads a JSON
//! file from data/planets/; any section or field left out falls back to
//! the Mars value.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive-exclusive bounds of a uniform draw, `[low, high)`.
pub type DrawRange = (f64, f64);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThermalConfig {
    /// Temperature at the start of a run, °C.
    pub base_temp:           f64,
    pub daily_mean_temp:     f64,
    pub daily_temp_amplitude: f64,
    pub seasonal_temp_amplitude: f64,
    pub temp_noise:          f64,
    pub base_pressure:       f64,
    pub pressure_amplitude:  f64,
    pub pressure_noise:      f64,
    pub base_sun:            f64,
    pub sun_amplitude:       f64,
    pub base_uv:             f64,
    pub uv_amplitude:        f64,
    /// Ls at which insolation peaks (perihelion), degrees.
    pub perihelion_ls:       f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            base_temp:               -63.0,
            daily_mean_temp:         -70.0,
            daily_temp_amplitude:     80.0,
            seasonal_temp_amplitude:  20.0,
            temp_noise:                2.0,
            base_pressure:             0.6,
            pressure_amplitude:        0.05,
            pressure_noise:            0.05,
            base_sun:                590.0,
            sun_amplitude:           130.0,
            base_uv:                  10.0,
            uv_amplitude:              5.0,
            perihelion_ls:           250.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DustConfig {
    pub base_dust:         f64,
    pub max_dust:          f64,
    pub dust_devil_extra:  f64,
    pub dust_noise:        f64,
    /// Day-fraction window (exclusive on both ends) for dust devils.
    pub dust_devil_window: DrawRange,
    pub calm_wind:         DrawRange,
    pub dust_devil_wind:   DrawRange,
    pub storm_wind:        DrawRange,
    pub storm_dust_gain:   DrawRange,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            base_dust:         100.0,
            max_dust:        10_000.0,
            dust_devil_extra:   50.0,
            dust_noise:         10.0,
            dust_devil_window: (0.4, 0.7),
            calm_wind:         (5.0, 15.0),
            dust_devil_wind:   (10.0, 25.0),
            storm_wind:        (25.0, 40.0),
            storm_dust_gain:   (50.0, 150.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StormConfig {
    /// Per-tick onset probability while calm.
    pub onset_chance:     f64,
    pub min_duration:     u32,
    /// Number of possible durations above `min_duration`.
    pub duration_span:    u32,
    pub intensity_range:  DrawRange,
    pub intensity_decay:  f64,
    pub intensity_floor:  f64,
    pub calm_dust_relax:  DrawRange,
    pub storm_dust_relax: DrawRange,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            onset_chance:     0.02,
            min_duration:     20,
            duration_span:    30,
            intensity_range:  (0.8, 1.2),
            intensity_decay:  0.01,
            intensity_floor:  0.5,
            calm_dust_relax:  (10.0, 50.0),
            storm_dust_relax: (30.0, 70.0),
        }
    }
}

/// Cumulative thresholds tested in order against a single draw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeismicConfig {
    pub strong_threshold: f64,
    pub medium_threshold: f64,
    pub weak_threshold:   f64,
}

impl Default for SeismicConfig {
    fn default() -> Self {
        Self {
            strong_threshold: 0.0005,
            medium_threshold: 0.002,
            weak_threshold:   0.01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    pub name:    String,
    pub thermal: ThermalConfig,
    pub dust:    DustConfig,
    pub storm:   StormConfig,
    pub seismic: SeismicConfig,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            name:    "mars".into(),
            thermal: ThermalConfig::default(),
            dust:    DustConfig::default(),
            storm:   StormConfig::default(),
            seismic: SeismicConfig::default(),
        }
    }
}

impl PlanetConfig {
    pub fn mars() -> Self {
        Self::default()
    }

    /// Load and validate a planet file.
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config = Self::from_json(&content)?;
        log::info!("loaded planet config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        let dust = &self.dust;
        if !(dust.base_dust >= 0.0 && dust.max_dust > dust.base_dust) {
            return invalid(format!(
                "max_dust ({}) must exceed base_dust ({}) and base_dust must be >= 0",
                dust.max_dust, dust.base_dust
            ));
        }
        let calm_peak = dust.base_dust + dust.dust_devil_extra + dust.dust_noise;
        if dust.max_dust < calm_peak {
            return invalid(format!(
                "max_dust ({}) must be at least base_dust + dust_devil_extra + dust_noise ({calm_peak})",
                dust.max_dust
            ));
        }
        for (label, range) in [
            ("dust_devil_window", dust.dust_devil_window),
            ("calm_wind", dust.calm_wind),
            ("dust_devil_wind", dust.dust_devil_wind),
            ("storm_wind", dust.storm_wind),
            ("storm_dust_gain", dust.storm_dust_gain),
            ("intensity_range", self.storm.intensity_range),
            ("calm_dust_relax", self.storm.calm_dust_relax),
            ("storm_dust_relax", self.storm.storm_dust_relax),
        ] {
            if range.0 > range.1 {
                return invalid(format!("{label} is inverted: {range:?}"));
            }
        }
        if dust.calm_wind.0 < 0.0 || dust.dust_devil_wind.0 < 0.0 || dust.storm_wind.0 < 0.0 {
            return invalid("wind ranges must be non-negative".into());
        }

        let storm = &self.storm;
        if !(0.0..=1.0).contains(&storm.onset_chance) {
            return invalid(format!("onset_chance {} outside [0, 1]", storm.onset_chance));
        }
        if storm.duration_span == 0 || storm.min_duration == 0 {
            return invalid("storm durations must be at least one tick".into());
        }
        if storm.intensity_floor <= 0.0 || storm.intensity_decay < 0.0 {
            return invalid("intensity_floor must be > 0 and intensity_decay >= 0".into());
        }
        if storm.intensity_range.0 < storm.intensity_floor {
            return invalid(format!(
                "intensity_range starts at {} below intensity_floor {}",
                storm.intensity_range.0, storm.intensity_floor
            ));
        }
        if storm.min_duration.checked_add(storm.duration_span - 1).is_none() {
            return invalid(format!(
                "longest storm ({} + {}) overflows the tick counter",
                storm.min_duration, storm.duration_span
            ));
        }

        let s = &self.seismic;
        let ordered = 0.0 <= s.strong_threshold
            && s.strong_threshold <= s.medium_threshold
            && s.medium_threshold <= s.weak_threshold
            && s.weak_threshold <= 1.0;
        if !ordered {
            return invalid(format!(
                "seismic thresholds must ascend within [0, 1]: {} / {} / {}",
                s.strong_threshold, s.medium_threshold, s.weak_threshold
            ));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> SimResult<()> {
    Err(SimError::InvalidConfig { reason })
}

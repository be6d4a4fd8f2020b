//! Vitamaris planet environment engine.
//!
//! Advances the surface environment of a planet (Mars by default) one
//! simulated minute per tick: temperature, pressure, radiation, dust,
//! wind, dust storms and seismic activity.

pub mod clock;
pub mod config;
pub mod dust_wind_subsystem;
pub mod engine;
pub mod error;
pub mod event;
pub mod rng;
pub mod seismic_subsystem;
pub mod state;
pub mod storm_subsystem;
pub mod subsystem;
pub mod thermal_subsystem;
pub mod types;

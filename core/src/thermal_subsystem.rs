//! Thermal & atmospheric model.
//!
//! Temperature follows a diurnal sine plus a seasonal sine on Ls.
//! Pressure follows a seasonal cosine. Solar and UV flux peak at
//! perihelion and are attenuated by the dust left from the previous tick.
//!
//! Draw order: temperature noise, pressure noise.

use crate::{
    config::{DustConfig, ThermalConfig},
    error::SimResult,
    event::PlanetEvent,
    rng::EntropySource,
    state::PlanetState,
    subsystem::{PlanetSubsystem, TickContext},
};
use std::f64::consts::TAU;

pub struct ThermalSubsystem {
    config:   ThermalConfig,
    max_dust: f64,
}

impl ThermalSubsystem {
    pub fn new(config: ThermalConfig, dust: &DustConfig) -> Self {
        Self { config, max_dust: dust.max_dust }
    }

    fn diurnal_temp(&self, day_fraction: f64) -> f64 {
        self.config.daily_mean_temp
            + self.config.daily_temp_amplitude * (TAU * day_fraction).sin()
    }

    /// Fraction of incoming flux that reaches the surface, floored at 0.
    pub fn dust_factor(dust: f64, max_dust: f64) -> f64 {
        (1.0 - dust / max_dust).max(0.0)
    }
}

impl PlanetSubsystem for ThermalSubsystem {
    fn name(&self) -> &'static str { "thermal" }

    fn update(
        &mut self,
        ctx: &TickContext,
        state: &mut PlanetState,
        rng: &mut dyn EntropySource,
    ) -> SimResult<Vec<PlanetEvent>> {
        let cfg = &self.config;
        let phase = ctx.phase_radians();

        let seasonal_temp = cfg.seasonal_temp_amplitude * phase.sin();
        let temp_noise = rng.uniform(-cfg.temp_noise, cfg.temp_noise)?;
        let temperature = self.diurnal_temp(ctx.day_fraction) + seasonal_temp + temp_noise;

        let pressure_noise = rng.uniform(-cfg.pressure_noise, cfg.pressure_noise)?;
        let pressure = cfg.base_pressure + cfg.pressure_amplitude * phase.cos() + pressure_noise;

        let insolation = (ctx.phase_degrees - cfg.perihelion_ls).to_radians().cos();
        let dust_factor = Self::dust_factor(state.dust, self.max_dust);

        state.temperature = temperature;
        state.pressure = pressure;
        state.solar_radiation =
            ((cfg.base_sun + cfg.sun_amplitude * insolation) * dust_factor).max(0.0);
        state.uv_radiation =
            ((cfg.base_uv + cfg.uv_amplitude * insolation) * dust_factor).max(0.0);

        log::trace!(
            "tick={} thermal: temp={:.1} press={:.3} sun={:.1} uv={:.1}",
            ctx.tick, state.temperature, state.pressure, state.solar_radiation, state.uv_radiation
        );

        Ok(vec![])
    }
}

//! Dust & wind model.
//!
//! An active storm dominates: dust accumulates and wind scales with
//! intensity. Without a storm, afternoon convection raises dust devils;
//! otherwise dust and wind sit near their calm baselines.
//!
//! Draw order: dust, then wind.

use crate::{
    config::DustConfig,
    error::SimResult,
    event::PlanetEvent,
    rng::EntropySource,
    state::{PlanetState, StormState},
    subsystem::{PlanetSubsystem, TickContext},
};

pub struct DustWindSubsystem {
    config: DustConfig,
}

impl DustWindSubsystem {
    pub fn new(config: DustConfig) -> Self {
        Self { config }
    }

    pub fn in_dust_devil_window(&self, day_fraction: f64) -> bool {
        let (start, end) = self.config.dust_devil_window;
        day_fraction > start && day_fraction < end
    }
}

impl PlanetSubsystem for DustWindSubsystem {
    fn name(&self) -> &'static str { "dust_wind" }

    fn update(
        &mut self,
        ctx: &TickContext,
        state: &mut PlanetState,
        rng: &mut dyn EntropySource,
    ) -> SimResult<Vec<PlanetEvent>> {
        let cfg = &self.config;

        match state.storm {
            StormState::Active { intensity, .. } => {
                let (lo, hi) = cfg.storm_dust_gain;
                let gain = rng.uniform(lo, hi)? * intensity;
                state.dust = (state.dust + gain).min(cfg.max_dust);
                let (lo, hi) = cfg.storm_wind;
                state.wind_speed = rng.uniform(lo, hi)? * intensity;
            }
            StormState::Calm if self.in_dust_devil_window(ctx.day_fraction) => {
                let noise = rng.uniform(-cfg.dust_noise, cfg.dust_noise)?;
                state.dust = (cfg.base_dust + cfg.dust_devil_extra + noise).min(cfg.max_dust);
                let (lo, hi) = cfg.dust_devil_wind;
                state.wind_speed = rng.uniform(lo, hi)?;
            }
            StormState::Calm => {
                let noise = rng.uniform(-cfg.dust_noise, cfg.dust_noise)?;
                state.dust = (cfg.base_dust + noise).min(cfg.max_dust);
                let (lo, hi) = cfg.calm_wind;
                state.wind_speed = rng.uniform(lo, hi)?;
            }
        }

        log::trace!(
            "tick={} dust_wind: dust={:.1} wind={:.1}",
            ctx.tick, state.dust, state.wind_speed
        );

        Ok(vec![])
    }
}

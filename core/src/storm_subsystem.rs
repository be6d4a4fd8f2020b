//! Dust storm lifecycle — Calm / Active.
//!
//! Calm:   dust relaxes toward baseline, then one onset roll.
//!         Onset sets duration = min_duration + [0, duration_span)
//!         and a random intensity.
//! Active: duration counts down, intensity decays to its floor,
//!         dust relaxes toward baseline. At zero the storm ends.
//!
//! Runs after dust/wind, so an onset only shows in dust and wind
//! from the next tick onward.
//!
//! Draw order (calm):   relax, onset roll, [duration, intensity].
//! Draw order (active): relax.

use crate::{
    config::{DustConfig, StormConfig},
    error::{SimError, SimResult},
    event::PlanetEvent,
    rng::EntropySource,
    state::{PlanetState, StormState},
    subsystem::{PlanetSubsystem, TickContext},
};

pub struct StormSubsystem {
    config:    StormConfig,
    base_dust: f64,
}

impl StormSubsystem {
    pub fn new(config: StormConfig, dust: &DustConfig) -> Self {
        Self { config, base_dust: dust.base_dust }
    }

    fn relax_dust(&self, state: &mut PlanetState, range: (f64, f64), rng: &mut dyn EntropySource) -> SimResult<()> {
        let drop = rng.uniform(range.0, range.1)?;
        state.dust = (state.dust - drop).max(self.base_dust);
        Ok(())
    }
}

impl PlanetSubsystem for StormSubsystem {
    fn name(&self) -> &'static str { "storm" }

    fn update(
        &mut self,
        ctx: &TickContext,
        state: &mut PlanetState,
        rng: &mut dyn EntropySource,
    ) -> SimResult<Vec<PlanetEvent>> {
        let cfg = &self.config;

        match state.storm {
            StormState::Calm => {
                self.relax_dust(state, cfg.calm_dust_relax, rng)?;

                if !rng.chance(cfg.onset_chance)? {
                    return Ok(vec![]);
                }

                let extra = rng.next_u64_below(u64::from(cfg.duration_span))?;
                let duration = u32::try_from(u64::from(cfg.min_duration) + extra)
                    .map_err(|_| SimError::InvalidConfig {
                        reason: format!("storm duration {} + {extra} overflows", cfg.min_duration),
                    })?;
                let (lo, hi) = cfg.intensity_range;
                let intensity = rng.uniform(lo, hi)?.max(cfg.intensity_floor);
                state.storm = StormState::Active { remaining_ticks: duration, intensity };

                log::info!(
                    "tick={} storm: dust storm began, duration={duration} intensity={intensity:.2}",
                    ctx.tick
                );
                Ok(vec![PlanetEvent::DustStormStarted { tick: ctx.tick, duration, intensity }])
            }
            StormState::Active { remaining_ticks, intensity } => {
                let remaining_ticks = remaining_ticks.saturating_sub(1);
                let intensity = (intensity - cfg.intensity_decay).max(cfg.intensity_floor);
                self.relax_dust(state, cfg.storm_dust_relax, rng)?;

                if remaining_ticks == 0 {
                    state.storm = StormState::Calm;
                    log::info!("tick={} storm: dust storm subsided", ctx.tick);
                    return Ok(vec![PlanetEvent::DustStormEnded { tick: ctx.tick }]);
                }

                state.storm = StormState::Active { remaining_ticks, intensity };
                log::debug!(
                    "tick={} storm: remaining={remaining_ticks} intensity={intensity:.2}",
                    ctx.tick
                );
                Ok(vec![])
            }
        }
    }
}

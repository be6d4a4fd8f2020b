//! Seismic classifier.
//!
//! One draw per tick, no memory of earlier ticks. The thresholds are
//! cumulative and tested in order (strong, medium, weak), so the
//! effective tier probabilities are the gaps between them:
//! strong 0.0005, medium 0.0015, weak 0.008.

use crate::{
    config::SeismicConfig,
    error::SimResult,
    event::PlanetEvent,
    rng::EntropySource,
    state::{PlanetState, Seismicity},
    subsystem::{PlanetSubsystem, TickContext},
};

/// Classify a single draw in [0, 1).
pub fn classify(r: f64, config: &SeismicConfig) -> Seismicity {
    if r < config.strong_threshold {
        Seismicity::Strong
    } else if r < config.medium_threshold {
        Seismicity::Medium
    } else if r < config.weak_threshold {
        Seismicity::Weak
    } else {
        Seismicity::None
    }
}

pub struct SeismicSubsystem {
    config: SeismicConfig,
}

impl SeismicSubsystem {
    pub fn new(config: SeismicConfig) -> Self {
        Self { config }
    }
}

impl PlanetSubsystem for SeismicSubsystem {
    fn name(&self) -> &'static str { "seismic" }

    fn update(
        &mut self,
        ctx: &TickContext,
        state: &mut PlanetState,
        rng: &mut dyn EntropySource,
    ) -> SimResult<Vec<PlanetEvent>> {
        let tier = classify(rng.unit()?, &self.config);
        state.seismicity = tier;

        match tier {
            Seismicity::None => Ok(vec![]),
            Seismicity::Strong => {
                log::warn!("tick={} seismic: strong marsquake", ctx.tick);
                Ok(vec![PlanetEvent::SeismicActivity { tick: ctx.tick, tier }])
            }
            _ => {
                log::debug!("tick={} seismic: {tier} marsquake", ctx.tick);
                Ok(vec![PlanetEvent::SeismicActivity { tick: ctx.tick, tier }])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_fall_into_the_next_tier() {
        let cfg = SeismicConfig::default();
        assert_eq!(classify(0.0, &cfg), Seismicity::Strong);
        assert_eq!(classify(0.0005, &cfg), Seismicity::Medium);
        assert_eq!(classify(0.002, &cfg), Seismicity::Weak);
        assert_eq!(classify(0.01, &cfg), Seismicity::None);
    }
}

//! The planet environment engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   0. Engine internals: clock advance, Ls and day-fraction derivation
//!   1. Thermal subsystem    (temperature, pressure, radiation)
//!   2. Dust/wind subsystem
//!   3. Storm subsystem      (lifecycle step)
//!   4. Seismic subsystem
//!
//! RULES:
//!   - Subsystems execute in registration order, every tick.
//!   - All subsystems share the engine's single random stream.
//!   - A tick runs against a working copy of the state and the stream
//!     and is committed only if every subsystem succeeds.

use crate::{
    config::PlanetConfig,
    dust_wind_subsystem::DustWindSubsystem,
    error::{SimError, SimResult},
    event::PlanetEvent,
    rng::{EntropySource, PlanetRng},
    seismic_subsystem::SeismicSubsystem,
    state::PlanetState,
    storm_subsystem::StormSubsystem,
    subsystem::{PlanetSubsystem, TickContext},
    thermal_subsystem::ThermalSubsystem,
    types::Tick,
};

pub struct PlanetEngine<R = PlanetRng> {
    pub config:       PlanetConfig,
    pub current_tick: Tick,
    /// None when built around a caller-supplied stream.
    seed:             Option<u64>,
    state:            PlanetState,
    rng:              R,
    subsystems:       Vec<Box<dyn PlanetSubsystem>>,
}

impl PlanetEngine<PlanetRng> {
    /// A Mars engine seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        let config = PlanetConfig::mars();
        let state = PlanetState::baseline(&config);
        Self::bare(config, state, PlanetRng::new(seed), Some(seed))
    }

    pub fn with_config(seed: u64, config: PlanetConfig) -> SimResult<Self> {
        config.validate()?;
        let state = PlanetState::baseline(&config);
        Ok(Self::bare(config, state, PlanetRng::new(seed), Some(seed)))
    }
}

impl<R: EntropySource + Clone> PlanetEngine<R> {
    /// Build a fully wired engine around an arbitrary stream.
    pub fn with_rng(rng: R, config: PlanetConfig) -> SimResult<Self> {
        config.validate()?;
        let state = PlanetState::baseline(&config);
        Ok(Self::bare(config, state, rng, None))
    }

    /// Resume from an existing state record.
    pub fn from_state(state: PlanetState, rng: R, config: PlanetConfig) -> SimResult<Self> {
        config.validate()?;
        let mut engine = Self::bare(config, state, rng, None);
        engine.current_tick = engine.state.clock.elapsed_minutes();
        Ok(engine)
    }

    fn bare(config: PlanetConfig, state: PlanetState, rng: R, seed: Option<u64>) -> Self {
        let mut engine = Self {
            config,
            current_tick: 0,
            seed,
            state,
            rng,
            subsystems: Vec::new(),
        };
        engine.register_default_subsystems();
        log::info!("planet engine created: planet={} seed={seed:?}", engine.config.name);
        engine
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn register_default_subsystems(&mut self) {
        for subsystem in default_subsystems(&self.config) {
            self.register(subsystem);
        }
    }

    /// Register a subsystem. Call in the documented execution order.
    pub fn register(&mut self, subsystem: Box<dyn PlanetSubsystem>) {
        self.subsystems.push(subsystem);
    }

    pub fn state(&self) -> &PlanetState {
        &self.state
    }

    /// Advance one tick. This is the core simulation step.
    ///
    /// On error the engine is left exactly as it was before the call.
    pub fn tick(&mut self) -> SimResult<Vec<PlanetEvent>> {
        let next_tick = self.current_tick + 1;
        let mut rng = self.rng.clone();

        match step(&self.state, next_tick, &mut rng, &mut self.subsystems) {
            Ok((state, mut events)) => {
                if self.current_tick == 0 {
                    events.insert(0, PlanetEvent::RunInitialized {
                        planet: self.config.name.clone(),
                        seed:   self.seed,
                    });
                }
                self.state = state;
                self.rng = rng;
                self.current_tick = next_tick;
                Ok(events)
            }
            Err(e) => {
                log::warn!("tick={next_tick} aborted, state left at tick {}: {e}", self.current_tick);
                Err(e)
            }
        }
    }

    /// Run n ticks in a loop. Used for testing and fast-forward.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<Vec<PlanetEvent>> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.tick()?);
        }
        Ok(events)
    }
}

/// The standard sub-models, in execution order.
pub fn default_subsystems(config: &PlanetConfig) -> Vec<Box<dyn PlanetSubsystem>> {
    // EXECUTION ORDER — fixed, documented, never reordered.
    let mut subsystems: Vec<Box<dyn PlanetSubsystem>> = Vec::with_capacity(4);
    subsystems.push(Box::new(ThermalSubsystem::new(config.thermal.clone(), &config.dust)));
    subsystems.push(Box::new(DustWindSubsystem::new(config.dust.clone())));
    subsystems.push(Box::new(StormSubsystem::new(config.storm.clone(), &config.dust)));
    subsystems.push(Box::new(SeismicSubsystem::new(config.seismic.clone())));
    subsystems
}

/// The pure form of a tick: state in, state out.
///
/// `rng` is advanced by exactly the draws this tick consumes. On error
/// the returned state is discarded by the caller; `state` is never
/// touched.
pub fn step(
    state: &PlanetState,
    tick: Tick,
    rng: &mut dyn EntropySource,
    subsystems: &mut [Box<dyn PlanetSubsystem>],
) -> SimResult<(PlanetState, Vec<PlanetEvent>)> {
    let mut next = state.clone();
    let mut events = vec![PlanetEvent::TickStarted { tick }];

    if next.clock.advance_one_minute() {
        log::info!("tick={tick} sol {} completed", next.clock.sol);
        events.push(PlanetEvent::SolCompleted { tick, sol: next.clock.sol });
    }

    let ctx = TickContext {
        tick,
        phase_degrees: next.clock.seasonal_phase_degrees(),
        day_fraction:  next.clock.day_fraction(),
    };

    for subsystem in subsystems.iter_mut() {
        let new_events = subsystem.update(&ctx, &mut next, rng)?;
        events.extend(new_events);
    }

    check_finite(&next, tick)?;

    log::debug!(
        "tick={tick} temp={:.1} wind={:.1} dust={:.1} storm={}",
        next.temperature, next.wind_speed, next.dust, next.storm.is_active()
    );

    events.push(PlanetEvent::ConditionsUpdated {
        tick,
        temperature:     next.temperature,
        pressure:        next.pressure,
        wind_speed:      next.wind_speed,
        dust:            next.dust,
        solar_radiation: next.solar_radiation,
        uv_radiation:    next.uv_radiation,
    });
    events.push(PlanetEvent::TickCompleted { tick });
    Ok((next, events))
}

/// State in, state out, with the standard sub-models.
///
/// The tick number is derived from the state's clock, so `state` must
/// come from a run that started at a zeroed clock.
pub fn update(
    state: &PlanetState,
    rng: &mut dyn EntropySource,
    config: &PlanetConfig,
) -> SimResult<(PlanetState, Vec<PlanetEvent>)> {
    config.validate()?;
    let tick = state.clock.elapsed_minutes() + 1;
    let mut subsystems = default_subsystems(config);
    step(state, tick, rng, &mut subsystems)
}

fn check_finite(state: &PlanetState, tick: Tick) -> SimResult<()> {
    let fields = [
        ("temperature", state.temperature),
        ("wind_speed", state.wind_speed),
        ("pressure", state.pressure),
        ("dust", state.dust),
        ("solar_radiation", state.solar_radiation),
        ("uv_radiation", state.uv_radiation),
    ];
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(SimError::Other(anyhow::anyhow!(
            "non-finite {name} ({value}) at tick {tick}"
        ))),
        None => Ok(()),
    }
}

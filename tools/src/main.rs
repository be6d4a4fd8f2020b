//! planet-runner: headless driver for the Vitamaris planet engine.
//!
//! The engine never schedules itself; this runner decides the cadence.
//!
//! Usage:
//!   planet-runner --seed 12345 --ticks 1480 --report-every 60
//!   planet-runner --seed 12345 --config data/planets/mars.json
//!   planet-runner --seed 12345 --ipc-mode

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use vitamaris_core::{
    config::PlanetConfig,
    engine::PlanetEngine,
    event::PlanetEvent,
    state::{PlanetState, Seismicity},
    types::Tick,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    tick:   Tick,
    status: String,
    state:  &'a PlanetState,
    events: Vec<PlanetEvent>,
}

/// Running totals for the end-of-run summary.
#[derive(Default)]
struct RunStats {
    storms:       u64,
    storm_ticks:  u64,
    quakes:       [u64; 3],
    min_temp:     Option<f64>,
    max_temp:     Option<f64>,
    peak_dust:    f64,
}

impl RunStats {
    fn record(&mut self, state: &PlanetState, events: &[PlanetEvent]) {
        for event in events {
            match event {
                PlanetEvent::DustStormStarted { .. } => self.storms += 1,
                PlanetEvent::SeismicActivity { tier, .. } => match tier {
                    Seismicity::Weak   => self.quakes[0] += 1,
                    Seismicity::Medium => self.quakes[1] += 1,
                    Seismicity::Strong => self.quakes[2] += 1,
                    Seismicity::None   => {}
                },
                _ => {}
            }
        }
        if state.is_dust_storm() {
            self.storm_ticks += 1;
        }
        let t = state.temperature;
        self.min_temp = Some(self.min_temp.map_or(t, |m| m.min(t)));
        self.max_temp = Some(self.max_temp.map_or(t, |m| m.max(t)));
        self.peak_dust = self.peak_dust.max(state.dust);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 1_480u64);
    let report_every = parse_arg(&args, "--report-every", 60u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => PlanetConfig::load(path)?,
        None => PlanetConfig::mars(),
    };

    if !ipc_mode {
        println!("Vitamaris — planet-runner");
        println!("  planet:       {}", config.name);
        println!("  seed:         {seed}");
        println!("  ticks:        {ticks}");
        println!("  report every: {report_every}");
        println!();
    }

    let mut engine = PlanetEngine::with_config(seed, config)?;

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        let stats = run_batch(&mut engine, ticks, report_every)?;
        print_summary(&engine, &stats, seed);
    }

    Ok(())
}

fn run_batch(engine: &mut PlanetEngine, ticks: u64, report_every: u64) -> Result<RunStats> {
    let mut stats = RunStats::default();
    for _ in 0..ticks {
        let events = engine.tick()?;
        stats.record(engine.state(), &events);

        let notable = events.iter().any(|e| {
            matches!(e, PlanetEvent::DustStormStarted { .. } | PlanetEvent::DustStormEnded { .. })
        });
        if notable || (report_every > 0 && engine.current_tick.is_multiple_of(report_every)) {
            println!("[{:>7}] {}", engine.current_tick, engine.state());
        }
    }
    Ok(stats)
}

fn run_ipc_loop(engine: &mut PlanetEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let events = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => Vec::new(),
            IpcCommand::Tick { count } => match engine.run_ticks(count) {
                Ok(events) => events
                    .into_iter()
                    .filter(|e| {
                        !matches!(
                            e,
                            PlanetEvent::TickStarted { .. }
                                | PlanetEvent::TickCompleted { .. }
                                | PlanetEvent::ConditionsUpdated { .. }
                        )
                    })
                    .collect(),
                Err(e) => {
                    log::warn!("ipc tick failed: {e}");
                    let err_json = serde_json::json!({ "error": e.to_string() });
                    writeln!(stdout, "{}", err_json)?;
                    stdout.flush()?;
                    continue;
                }
            },
        };

        let state = UiState {
            tick:   engine.current_tick,
            status: engine.state().status_line(),
            state:  engine.state(),
            events,
        };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(engine: &PlanetEngine, stats: &RunStats, seed: u64) {
    let state = engine.state();
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  seed:           {seed}");
    println!("  ticks run:      {}", engine.current_tick);
    println!("  sols elapsed:   {}", state.clock.sol);
    println!("  final Ls:       {:.1}°", state.clock.seasonal_phase_degrees());
    println!("  dust storms:    {}", stats.storms);
    println!("  storm ticks:    {}", stats.storm_ticks);
    println!(
        "  quakes:         weak {} / medium {} / strong {}",
        stats.quakes[0], stats.quakes[1], stats.quakes[2]
    );
    if let (Some(lo), Some(hi)) = (stats.min_temp, stats.max_temp) {
        println!("  temperature:    {lo:.1}°C .. {hi:.1}°C");
    }
    println!("  peak dust:      {:.1} µg/m³", stats.peak_dust);
    println!();
    println!("  {state}");
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

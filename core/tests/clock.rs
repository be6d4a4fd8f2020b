//! Clock rollover and sol accounting.

use vitamaris_core::{
    clock::{MarsClock, HOURS_PER_SOL, MINUTES_PER_HOUR},
    engine::PlanetEngine,
    event::PlanetEvent,
};

#[test]
fn one_tick_wraps_minute_hour_and_sol() {
    let mut clock = MarsClock::at(0, 24.6, 59.9);
    let rolled = clock.advance_one_minute();

    assert!(rolled);
    assert_eq!(clock.sol, 1);
    assert!((clock.minute - 0.9).abs() < 1e-9, "minute={}", clock.minute);
    assert!((clock.hour - (25.6 - HOURS_PER_SOL)).abs() < 1e-9, "hour={}", clock.hour);
}

#[test]
fn invariants_hold_after_every_advance() {
    let mut clock = MarsClock::new();
    for _ in 0..100_000 {
        clock.advance_one_minute();
        assert!(clock.hour >= 0.0 && clock.hour < HOURS_PER_SOL, "hour={}", clock.hour);
        assert!(clock.minute >= 0.0 && clock.minute < MINUTES_PER_HOUR, "minute={}", clock.minute);
    }
}

#[test]
fn first_sol_completes_exactly_once() {
    let mut clock = MarsClock::new();
    let mut rollovers = 0;
    // The first hour overflow past 24.659722 happens when hour reaches 25.
    for _ in 0..1_499 {
        if clock.advance_one_minute() {
            rollovers += 1;
        }
    }
    assert_eq!(rollovers, 0);
    assert_eq!(clock.sol, 0);

    assert!(clock.advance_one_minute());
    assert_eq!(clock.sol, 1);
}

#[test]
fn elapsed_time_is_conserved() {
    let mut clock = MarsClock::new();
    for ticks in 1..=50_000u64 {
        clock.advance_one_minute();
        let elapsed_hours =
            clock.sol as f64 * HOURS_PER_SOL + clock.hour + clock.minute / MINUTES_PER_HOUR;
        assert!(
            (elapsed_hours - ticks as f64 / MINUTES_PER_HOUR).abs() < 1e-6,
            "elapsed drift at tick {ticks}: {elapsed_hours}"
        );
    }
}

#[test]
fn engine_reports_sol_rollover_events() {
    let mut engine = PlanetEngine::new(3);
    let events = engine.run_ticks(3_000).unwrap();

    let sols: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            PlanetEvent::SolCompleted { sol, .. } => Some(*sol),
            _ => None,
        })
        .collect();
    assert_eq!(sols, vec![1, 2]);
    assert_eq!(engine.state().clock.sol, 2);
}

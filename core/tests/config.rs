//! Planet config loading and validation.

use vitamaris_core::{config::PlanetConfig, engine::PlanetEngine, error::SimError};

fn mars_path() -> String {
    format!("{}/../data/planets/mars.json", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn shipped_mars_file_matches_defaults() {
    let loaded = PlanetConfig::load(mars_path()).expect("load mars.json");
    assert_eq!(loaded, PlanetConfig::mars());
}

#[test]
fn missing_fields_fall_back_to_mars() {
    let config = PlanetConfig::from_json(r#"{ "storm": { "onset_chance": 0.1 } }"#).unwrap();
    assert_eq!(config.storm.onset_chance, 0.1);
    assert_eq!(config.storm.min_duration, 20);
    assert_eq!(config.dust, PlanetConfig::mars().dust);
    assert_eq!(config.name, "mars");
}

#[test]
fn unordered_seismic_thresholds_are_rejected() {
    let err = PlanetConfig::from_json(
        r#"{ "seismic": { "strong_threshold": 0.01, "medium_threshold": 0.002, "weak_threshold": 0.0005 } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig { .. }), "unexpected error: {err}");
}

#[test]
fn dust_cap_below_baseline_is_rejected() {
    let mut config = PlanetConfig::mars();
    config.dust.max_dust = 50.0;
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));
    assert!(PlanetEngine::with_config(1, config).is_err());
}

#[test]
fn zero_duration_storms_are_rejected() {
    let mut config = PlanetConfig::mars();
    config.storm.duration_span = 0;
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = PlanetConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, SimError::Serialization(_)));
}

#[test]
fn missing_file_is_reported() {
    let err = PlanetConfig::load("/nonexistent/planet.json").unwrap_err();
    assert!(err.to_string().contains("Cannot read"), "{err}");
}

#[test]
fn dust_cap_below_dust_devil_peak_is_rejected() {
    let mut config = PlanetConfig::mars();
    config.dust.max_dust = 120.0; // calm afternoon can reach 100 + 50 + 10
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));

    config.dust.max_dust = 160.0;
    config.validate().expect("cap at the dust-devil peak is allowed");
}

#[test]
fn lowest_allowed_dust_cap_holds_over_a_sol() {
    let mut config = PlanetConfig::mars();
    config.dust.max_dust = 160.0;
    let mut engine = PlanetEngine::with_config(0xD057, config).unwrap();
    for tick in 1..=1_500 {
        engine.tick().unwrap();
        let dust = engine.state().dust;
        assert!((100.0..=160.0).contains(&dust), "dust {dust} out of bounds at tick {tick}");
    }
}

#[test]
fn intensity_range_below_floor_is_rejected() {
    let mut config = PlanetConfig::mars();
    config.storm.intensity_range = (0.1, 0.2);
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));

    config.storm.intensity_range = (0.5, 0.6);
    config.validate().expect("range starting at the floor is allowed");
}

#[test]
fn overflowing_storm_duration_is_rejected() {
    let mut config = PlanetConfig::mars();
    config.storm.min_duration = u32::MAX;
    config.storm.onset_chance = 1.0;
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));
    assert!(PlanetEngine::with_config(1, config.clone()).is_err());

    config.storm.min_duration = u32::MAX - 29;
    config.validate().expect("longest storm fits exactly");
}

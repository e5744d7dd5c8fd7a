//! Integration tests for the DemoSource

use stintfuel_adapters::DemoSource;
use stintfuel_core::source::TelemetrySource;

#[test]
fn test_demo_source_name() {
    let source = DemoSource::new();
    assert_eq!(source.name(), "Demo");
}

#[test]
fn test_demo_source_detect_always_true() {
    let source = DemoSource::new();
    assert!(source.detect(), "DemoSource should always be detected");
}

#[test]
fn test_demo_source_initially_inactive() {
    let source = DemoSource::new();
    assert!(
        !source.is_active(),
        "DemoSource should be inactive before start()"
    );
}

#[test]
fn test_demo_source_poll_when_inactive_returns_none() {
    let mut source = DemoSource::new();
    let snapshot = source.poll().unwrap();
    assert!(
        snapshot.is_none(),
        "poll() should return None when source is inactive"
    );
}

#[test]
fn test_demo_source_start_and_stop() {
    let mut source = DemoSource::new();

    source.start().expect("start() should succeed");
    assert!(source.is_active(), "Source should be active after start()");

    source.stop().expect("stop() should succeed");
    assert!(!source.is_active(), "Source should be inactive after stop()");
}

#[test]
fn test_demo_source_produces_complete_snapshot() {
    let mut source = DemoSource::new();
    source.start().expect("start() should succeed");

    let snapshot = source
        .poll()
        .expect("poll() should not error")
        .expect("poll() should return Some after start()");

    assert_eq!(snapshot.source, "Demo");
    assert_eq!(snapshot.on_track, Some(true));

    // Every field the engine requires must be present and valid
    let valid = snapshot
        .validate()
        .expect("demo snapshots should always validate");
    assert!(valid.fuel_level > 0.0, "tank should not start empty");
    assert!((0.0..1.0).contains(&valid.lap_dist_pct));
}

#[test]
fn test_demo_source_values_in_reasonable_range() {
    let mut source = DemoSource::new();
    source.start().expect("start() should succeed");

    let snapshot = source.poll().unwrap().unwrap();

    let fuel = snapshot.fuel_level.unwrap();
    assert!(
        (0.0..=60.0).contains(&fuel),
        "Fuel {} should be within tank capacity",
        fuel
    );

    let lap = snapshot.lap.unwrap();
    assert!(lap >= 0, "Lap {} should be non-negative", lap);

    // A freshly started session is at the start of lap 0, not in the pits
    assert_eq!(snapshot.on_pit_road, Some(false));
}

#[test]
fn test_demo_source_produces_multiple_snapshots() {
    let mut source = DemoSource::new();
    source.start().expect("start() should succeed");

    for i in 0..5 {
        let snapshot = source
            .poll()
            .expect("poll() should not error")
            .unwrap_or_else(|| panic!("Snapshot {} should be Some", i));
        assert_eq!(snapshot.source, "Demo");
    }
}

#[test]
fn test_demo_source_fuel_does_not_increase_mid_lap() {
    let mut source = DemoSource::new();
    source.start().expect("start() should succeed");

    let first = source.poll().unwrap().unwrap().fuel_level.unwrap();
    std::thread::sleep(std::time::Duration::from_millis(50));
    let second = source.poll().unwrap().unwrap().fuel_level.unwrap();

    assert!(
        second <= first,
        "Fuel should only decrease between nearby polls ({} -> {})",
        first,
        second
    );
}

#[test]
fn test_demo_source_snapshot_serializes_to_json() {
    let mut source = DemoSource::new();
    source.start().expect("start() should succeed");

    let snapshot = source.poll().unwrap().unwrap();
    let json = serde_json::to_string(&snapshot).expect("Snapshot should serialize");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("JSON should parse");
    assert_eq!(parsed["source"], "Demo");
    assert_eq!(parsed["on_track"], true);
}

#[test]
fn test_demo_source_default_trait() {
    let source = DemoSource::default();
    assert_eq!(source.name(), "Demo");
    assert!(!source.is_active());
}

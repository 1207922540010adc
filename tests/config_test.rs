//! Tests for configuration validation

use emergency_dispatch::config::{
    DepartmentCapacities, MsRange, SimulationConfig, MAX_BUFFER_CAPACITY, MAX_LOG_CAPACITY,
    MAX_QUEUE_DEPTH,
};
use emergency_dispatch::core::DispatchError;

#[test]
fn test_default_config_validation() {
    let cfg = SimulationConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.queue_depth, 5);
    assert_eq!(cfg.buffer_capacity, 10);
    assert_eq!(cfg.dispatch_period_ms, 1500);
    assert_eq!(cfg.route_timeout_ms, 100);
    assert_eq!(cfg.generation_interval, MsRange::new(1000, 2000));
    assert_eq!(cfg.service_time, MsRange::new(3000, 8000));
    assert_eq!(cfg.backoff_ms, 500);
    assert_eq!(cfg.log_capacity, 10);
}

#[test]
fn test_zero_capacity_invalid() {
    let cfg = SimulationConfig {
        capacities: DepartmentCapacities {
            police: 4,
            ambulance: 0,
            fire: 2,
        },
        ..SimulationConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(DispatchError::InvalidConfig(_))));
}

#[test]
fn test_inverted_range_invalid() {
    let cfg = SimulationConfig {
        service_time: MsRange::new(8000, 3000),
        ..SimulationConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_zero_buffer_invalid() {
    let cfg = SimulationConfig {
        buffer_capacity: 0,
        ..SimulationConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_from_json_fills_defaults() {
    let json = r#"{
        "capacities": { "police": 1, "ambulance": 1, "fire": 1 },
        "service_time": { "min_ms": 50, "max_ms": 50 },
        "seed": 9
    }"#;

    let cfg = SimulationConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.capacities.total(), 3);
    assert_eq!(cfg.service_time, MsRange::fixed(50));
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.queue_depth, 5);
}

#[test]
fn test_config_from_bad_json() {
    assert!(matches!(
        SimulationConfig::from_json_str("{ not json"),
        Err(DispatchError::InvalidConfig(_))
    ));
    assert!(SimulationConfig::from_json_str(r#"{"log_capacity": 0}"#).is_err());
}

#[test]
fn test_oversized_buffer_from_json_rejected() {
    let result = SimulationConfig::from_json_str(r#"{"buffer_capacity": 18446744073709551615}"#);
    assert!(matches!(result, Err(DispatchError::InvalidConfig(msg)) if msg.contains("buffer_capacity")));
}

#[test]
fn test_oversized_queue_and_log_rejected() {
    let cfg = SimulationConfig {
        queue_depth: MAX_QUEUE_DEPTH + 1,
        ..SimulationConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(DispatchError::InvalidConfig(msg)) if msg.contains("queue_depth")));

    let cfg = SimulationConfig {
        log_capacity: usize::MAX,
        ..SimulationConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(DispatchError::InvalidConfig(msg)) if msg.contains("log_capacity")));
}

#[test]
fn test_limits_themselves_accepted() {
    let cfg = SimulationConfig {
        buffer_capacity: MAX_BUFFER_CAPACITY,
        log_capacity: MAX_LOG_CAPACITY,
        ..SimulationConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_total_units_saturates() {
    let caps = DepartmentCapacities {
        police: u32::MAX,
        ambulance: 3,
        fire: 2,
    };
    assert_eq!(caps.total(), u32::MAX);
}

//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use pickup::config::{AppConfig, SteeringMode};
use pickup::scene::SceneBuilder;
use pickup_core::{CameraMode, WheelSpinPolicy};
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("PICKUP_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("PICKUP_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_enum() {
    std::env::set_var("PICKUP_VEHICLE__STEERING_POLICY", "snap");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.vehicle.steering_policy, SteeringMode::Snap);
    std::env::remove_var("PICKUP_VEHICLE__STEERING_POLICY");
}

#[test]
#[serial]
fn test_default_toml_loading() {
    std::env::remove_var("PICKUP_WINDOW__TITLE");

    let config = AppConfig::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config")).unwrap();
    assert_eq!(config.window.title, "Pickup");
    assert_eq!(config.camera.start_position, [12.0, 4.0, -12.0]);
    assert_eq!(config.camera.mode, CameraMode::Origin);
    assert_eq!(config.vehicle.steering_policy, SteeringMode::RateLimited);
    assert_eq!(config.vehicle.wheel_spin_policy, WheelSpinPolicy::Accumulate);
    assert!(config.vehicle.follow_terrain);
    assert_eq!(config.ground.resolution, 100);
    assert_eq!(config.ground.waves.len(), 4);
    assert_eq!(config.ground.waves[2].direction, [-2.0, 1.0]);
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.window.width, defaults.window.width);
    assert_eq!(config.vehicle.move_speed, defaults.vehicle.move_speed);
    assert_eq!(config.rendering.max_dt, defaults.rendering.max_dt);
}

#[test]
#[serial]
fn test_default_toml_builds_scene() {
    let mut config =
        AppConfig::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config")).unwrap();
    config.ground.resolution = 8;

    let scene = SceneBuilder::from_config(&config).build();
    assert_eq!(scene.ground().mesh().vertices.len(), 81);
    // Settled on the rolling hills, not left at the spawn height
    let bound = scene.ground().field().amplitude_bound();
    let y = scene.vehicle_state().position.y;
    assert!(y.is_finite());
    assert!(y.abs() <= bound + 0.5);
}

//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use s72_hierarchy::config::GeneratorConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("S72_CAMERA__MIN_DISTANCE", "80");
    let config = GeneratorConfig::load().unwrap();
    assert_eq!(config.camera.min_distance, 80.0);
    std::env::remove_var("S72_CAMERA__MIN_DISTANCE");
}

#[test]
#[serial]
fn test_env_override_string() {
    std::env::set_var("S72_MESH__SRC", "other.b72");
    let config = GeneratorConfig::load().unwrap();
    assert_eq!(config.mesh.src, "other.b72");
    std::env::remove_var("S72_MESH__SRC");
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("S72_CAMERA__MIN_DISTANCE");
    std::env::remove_var("S72_MESH__SRC");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = GeneratorConfig::load().unwrap();
    let builtin = GeneratorConfig::default();
    assert_eq!(config.camera.name, builtin.camera.name);
    assert_eq!(config.camera.aspect, builtin.camera.aspect);
    assert_eq!(config.camera.distance_per_node, builtin.camera.distance_per_node);
    assert_eq!(config.material.albedo, builtin.material.albedo);
    assert_eq!(config.mesh.src, builtin.mesh.src);
    assert_eq!(config.hierarchy.child_offset, builtin.hierarchy.child_offset);
}

//! Integration tests for ConfigManager and the persisted options
//!
//! These tests verify:
//! - Defaults when nothing was saved
//! - Save/load through a named slot
//! - camelCase settings files written by older panels
//! - Environment overrides layered over the slot file
//! - Integration with StateManager

use camino::Utf8PathBuf;
use layer_namer::models::{RenameOptions, RenameOptionsUpdate};
use layer_namer::{ConfigManager, StateChange, StateManager};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

/// Each test reads its own prefix so environment overrides never leak between tests
fn manager(dir: &Utf8PathBuf, prefix: &str) -> ConfigManager {
    ConfigManager::new(dir).unwrap().with_env_prefix(prefix)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(manager.settings_path(), config_path.join("layer-namer.yaml"));
}

#[test]
fn test_missing_config_dir_is_created() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("nested").join("settings");

    ConfigManager::new(&nested).unwrap();
    assert!(nested.exists());
}

#[test]
fn test_load_defaults_when_nothing_saved() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let options = manager(&config_path, "LAYER_NAMER_IT_DEFAULTS")
        .load_options()
        .unwrap();

    assert_eq!(options, RenameOptions::default());
}

#[test]
fn test_save_and_load_round_trip() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "LAYER_NAMER_IT_ROUND_TRIP");

    let options = RenameOptions {
        hidden: true,
        use_pascal_case: true,
        ..RenameOptions::default()
    };
    manager.save_options(&options).unwrap();

    assert_eq!(manager.load_options().unwrap(), options);
}

#[test]
fn test_slots_are_independent() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let first = ConfigManager::with_slot(&config_path, "first")
        .unwrap()
        .with_env_prefix("LAYER_NAMER_IT_SLOTS");
    let second = ConfigManager::with_slot(&config_path, "second")
        .unwrap()
        .with_env_prefix("LAYER_NAMER_IT_SLOTS");

    first.save_options(&RenameOptions::permissive()).unwrap();

    assert_eq!(first.load_options().unwrap(), RenameOptions::permissive());
    assert_eq!(second.load_options().unwrap(), RenameOptions::default());
    assert!(config_path.join("first.yaml").exists());
    assert!(!config_path.join("second.yaml").exists());
}

#[test]
fn test_camel_case_settings_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "LAYER_NAMER_IT_CAMEL");

    fs::write(
        manager.settings_path(),
        "locked: true\nshowSpacing: true\nrenameCustomNames: true\n",
    )
    .unwrap();

    let options = manager.load_options().unwrap();
    assert!(options.locked);
    assert!(options.show_spacing);
    assert!(options.rename_custom_names);
    assert!(!options.use_pascal_case);
}

#[test]
fn test_invalid_settings_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "LAYER_NAMER_IT_INVALID");

    fs::write(manager.settings_path(), "locked: [not, a, bool]\n").unwrap();

    assert!(manager.load_options().is_err());
}

#[test]
fn test_environment_overrides_slot_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "LAYER_NAMER_IT_ENV");

    manager
        .save_options(&RenameOptions {
            hidden: false,
            instance: true,
            ..RenameOptions::default()
        })
        .unwrap();

    // SAFETY: this prefix is only read by this test
    unsafe {
        std::env::set_var("LAYER_NAMER_IT_ENV_HIDDEN", "true");
    }

    let options = manager.load_options().unwrap();

    unsafe {
        std::env::remove_var("LAYER_NAMER_IT_ENV_HIDDEN");
    }

    assert!(options.hidden);
    assert!(options.instance);
}

#[test]
fn test_update_merged_over_persisted_options() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "LAYER_NAMER_IT_MERGE");

    manager
        .save_options(&RenameOptions {
            locked: true,
            show_spacing: true,
            ..RenameOptions::default()
        })
        .unwrap();

    let update = RenameOptionsUpdate {
        locked: Some(false),
        hidden: Some(true),
        ..RenameOptionsUpdate::default()
    };
    let merged = update.apply_to(manager.load_options().unwrap());

    assert!(!merged.locked);
    assert!(merged.hidden);
    assert!(merged.show_spacing);
}

#[test]
fn test_loaded_options_flow_into_state() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "LAYER_NAMER_IT_STATE");
    manager.save_options(&RenameOptions::permissive()).unwrap();

    let state = StateManager::new();
    let changes = state.set_options(manager.load_options().unwrap());

    assert_eq!(changes, vec![StateChange::OptionsChanged]);
    assert_eq!(state.read(|s| s.options), RenameOptions::permissive());
}

//! Common test utilities for integration tests
//!
//! Provides env-file fixtures and environment scoping shared across the
//! integration test files.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use stego_settings::SettingsGroup;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `contents` as the env-file of `group` inside `dir`
pub fn write_env_file(dir: &Path, group: SettingsGroup, contents: &str) {
    fs::write(dir.join(group.env_file()), contents).expect("Failed to write env file");
}

/// Run `f` with every settings variable unset, then `vars` applied
///
/// Settings variables are cleared in both lower and upper case so values
/// from the host environment never leak into a test.
pub fn with_settings_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let mut env: Vec<(String, Option<String>)> = SettingsGroup::ALL
        .iter()
        .flat_map(|group| group.fields())
        .flat_map(|field| [field.to_string(), field.to_uppercase()])
        .filter(|key| !vars.iter().any(|(set, _)| *set == key.as_str()))
        .map(|key| (key, None))
        .collect();

    env.extend(
        vars.iter()
            .map(|(key, value)| ((*key).to_string(), Some((*value).to_string()))),
    );

    temp_env::with_vars(env, f)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

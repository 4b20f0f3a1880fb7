//! Process-wide settings singletons
//!
//! Each group is stored at most once for the life of the process. Call
//! [`init_global`] at startup to load everything eagerly, or let the
//! accessors load their group lazily on first use. A failed lazy load is not
//! cached.

use std::sync::OnceLock;

use super::loader::SettingsLoader;
use crate::domain::error::{ConfigError, ConfigResult};
use crate::domain::models::{
    AlgorithmSettings, AppSettings, CorsSettings, Settings, StorageSettings,
};

static CORS: OnceLock<CorsSettings> = OnceLock::new();
static ALGORITHM: OnceLock<AlgorithmSettings> = OnceLock::new();
static STORAGE: OnceLock<StorageSettings> = OnceLock::new();

/// Load every settings group with `loader` and store them globally
///
/// Stores nothing if a group is already initialized when the call starts or
/// any group cannot be loaded. A lazy accessor running on another thread can
/// still store its group between the check and the store. In that case the
/// remaining groups are stored and the first group found taken is reported
/// as [`ConfigError::AlreadyInitialized`].
pub fn init_global(loader: &SettingsLoader) -> ConfigResult<()> {
    ensure_unset(&CORS)?;
    ensure_unset(&ALGORITHM)?;
    ensure_unset(&STORAGE)?;

    let settings = loader.load_all()?;
    store_all(&CORS, &ALGORITHM, &STORAGE, settings)
}

/// CORS settings, loaded on first use
pub fn cors() -> ConfigResult<&'static CorsSettings> {
    get_or_load(&CORS)
}

/// Algorithm markers, loaded on first use
pub fn algorithm() -> ConfigResult<&'static AlgorithmSettings> {
    get_or_load(&ALGORITHM)
}

/// Storage settings, loaded on first use
pub fn storage() -> ConfigResult<&'static StorageSettings> {
    get_or_load(&STORAGE)
}

fn get_or_load<S: Settings>(cell: &'static OnceLock<S>) -> ConfigResult<&'static S> {
    if let Some(settings) = cell.get() {
        return Ok(settings);
    }

    let loaded = SettingsLoader::new().load::<S>()?;
    Ok(cell.get_or_init(|| loaded))
}

fn ensure_unset<S: Settings>(cell: &OnceLock<S>) -> ConfigResult<()> {
    match cell.get() {
        Some(_) => Err(ConfigError::AlreadyInitialized(S::GROUP)),
        None => Ok(()),
    }
}

/// Store each group in its cell, skipping cells that are already set
fn store_all(
    cors: &OnceLock<CorsSettings>,
    algorithm: &OnceLock<AlgorithmSettings>,
    storage: &OnceLock<StorageSettings>,
    settings: AppSettings,
) -> ConfigResult<()> {
    let results = [
        store(cors, settings.cors),
        store(algorithm, settings.algorithm),
        store(storage, settings.storage),
    ];

    results.into_iter().collect()
}

fn store<S: Settings>(cell: &OnceLock<S>, settings: S) -> ConfigResult<()> {
    cell.set(settings)
        .map_err(|_| ConfigError::AlreadyInitialized(S::GROUP))
}

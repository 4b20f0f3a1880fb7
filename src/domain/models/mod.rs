//! Settings records and their field coercion

pub mod coercion;
pub mod settings;

pub use settings::{
    AlgorithmSettings, AppSettings, CorsSettings, GroupSettings, Settings, SettingsGroup,
    StorageSettings,
};

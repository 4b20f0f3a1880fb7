//! Stego settings
//!
//! Process-wide configuration for the stego API service, split into three
//! independent groups:
//!
//! - **CORS** (`client_url`, `allowed_methods`), env-file `.env.cors`
//! - **Algorithm** (`prefix`, `suffix`), env-file `.env.algorithm`
//! - **Storage** (`root_directory`), env-file `.env.storage`
//!
//! Each field is read from the environment, matched ignoring case, and falls
//! back to the group's env-file. Every field is required.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): settings records, groups and errors
//! - **Infrastructure Layer** (`infrastructure`): figment-based loading,
//!   global singletons and logging
//!
//! # Example
//!
//! ```no_run
//! use stego_settings::{settings, SettingsLoader};
//!
//! fn main() -> Result<(), stego_settings::ConfigError> {
//!     settings::init_global(&SettingsLoader::new())?;
//!
//!     let cors = settings::cors()?;
//!     println!("allowing {:?} from {}", cors.allowed_methods, cors.client_url);
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;

pub use infrastructure::config::global as settings;

// Re-export commonly used types for convenience
pub use domain::models::{
    AlgorithmSettings, AppSettings, CorsSettings, GroupSettings, Settings, SettingsGroup,
    StorageSettings,
};
pub use domain::{ConfigError, ConfigResult};
pub use infrastructure::config::SettingsLoader;
pub use infrastructure::logging::{LogConfig, LogFormat, LoggerImpl, RotationPolicy};

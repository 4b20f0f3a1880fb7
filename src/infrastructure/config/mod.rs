//! Configuration management infrastructure
//!
//! Settings groups loaded with figment:
//! - Environment variables matched to field names ignoring case
//! - Per-group env-file fallback (`.env.<group>`)
//! - Lenient string coercion for list fields
//! - Write-once process-wide singletons

pub mod global;
pub mod loader;
pub mod sources;

pub use loader::SettingsLoader;
pub use sources::GroupSource;

use std::path::PathBuf;

use thiserror::Error;

use super::models::SettingsGroup;

/// Errors raised while building settings records
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required field is set in neither the environment nor the env-file
    #[error("Missing required field '{field}' for {group} settings (set {env_var} or add it to {env_file})", env_var = .field.to_uppercase(), env_file = .group.env_file())]
    MissingField {
        /// Group declaring the field
        group: SettingsGroup,
        /// Canonical field name
        field: String,
    },

    /// The env-file exists but could not be read or parsed
    #[error("Failed to read env file {}: {source}", .path.display())]
    EnvFile {
        /// Path of the env-file
        path: PathBuf,
        /// Underlying read or parse error
        #[source]
        source: dotenvy::Error,
    },

    /// A value is present but cannot be coerced to the field's type
    #[error("Invalid value in {group} settings: {source}")]
    Invalid {
        /// Group being extracted
        group: SettingsGroup,
        /// Extraction error
        #[source]
        source: Box<figment::Error>,
    },

    /// A group name matched none of the known groups
    #[error("Unknown settings group: {0}. Must be one of: cors, algorithm, storage")]
    UnknownGroup(String),

    /// The group was stored globally before
    #[error("{0} settings are already initialized")]
    AlreadyInitialized(SettingsGroup),
}

/// Result type for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Group the error belongs to, when it is tied to one
    pub fn group(&self) -> Option<SettingsGroup> {
        match self {
            Self::MissingField { group, .. }
            | Self::Invalid { group, .. }
            | Self::AlreadyInitialized(group) => Some(*group),
            Self::EnvFile { .. } | Self::UnknownGroup(_) => None,
        }
    }

    /// True for [`ConfigError::MissingField`]
    pub const fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

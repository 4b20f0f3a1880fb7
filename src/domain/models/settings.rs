use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::coercion;
use crate::domain::error::ConfigError;

/// One of the independent settings groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsGroup {
    /// Cross-origin request settings
    Cors,
    /// Payload marker tokens
    Algorithm,
    /// File storage location
    Storage,
}

impl SettingsGroup {
    /// Every group, in declaration order
    pub const ALL: [Self; 3] = [Self::Cors, Self::Algorithm, Self::Storage];

    /// Lowercase group name, e.g. `cors`
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cors => "cors",
            Self::Algorithm => "algorithm",
            Self::Storage => "storage",
        }
    }

    /// File name of the group's env-file, e.g. `.env.cors`
    pub const fn env_file(self) -> &'static str {
        match self {
            Self::Cors => ".env.cors",
            Self::Algorithm => ".env.algorithm",
            Self::Storage => ".env.storage",
        }
    }

    /// Field names declared by the group, in declaration order
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Cors => &["client_url", "allowed_methods"],
            Self::Algorithm => &["prefix", "suffix"],
            Self::Storage => &["root_directory"],
        }
    }

    /// Canonical spelling of a field if `key` names one, ignoring case
    pub fn field_for_key(self, key: &str) -> Option<&'static str> {
        self.fields()
            .iter()
            .copied()
            .find(|field| field.eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for SettingsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingsGroup {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownGroup(s.to_string()))
    }
}

/// A settings record bound to exactly one group
pub trait Settings: DeserializeOwned + Send + Sync + 'static {
    /// Group the record is loaded for
    const GROUP: SettingsGroup;
}

/// CORS policy for the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CorsSettings {
    /// Origin of the web client allowed to call the API
    pub client_url: String,

    /// HTTP methods allowed for cross-origin requests
    #[serde(deserialize_with = "coercion::string_list")]
    pub allowed_methods: Vec<String>,
}

impl Settings for CorsSettings {
    const GROUP: SettingsGroup = SettingsGroup::Cors;
}

/// Marker tokens wrapped around embedded payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AlgorithmSettings {
    /// Token written before the payload
    pub prefix: String,
    /// Token written after the payload
    pub suffix: String,
}

impl Settings for AlgorithmSettings {
    const GROUP: SettingsGroup = SettingsGroup::Algorithm;
}

/// Where the service keeps its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageSettings {
    /// Directory under which uploaded and generated files are kept
    pub root_directory: PathBuf,
}

impl Settings for StorageSettings {
    const GROUP: SettingsGroup = SettingsGroup::Storage;
}

/// Settings record for a group picked at runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "group", rename_all = "lowercase")]
pub enum GroupSettings {
    /// CORS group
    Cors(CorsSettings),
    /// Algorithm group
    Algorithm(AlgorithmSettings),
    /// Storage group
    Storage(StorageSettings),
}

impl GroupSettings {
    /// Group this record belongs to
    pub const fn group(&self) -> SettingsGroup {
        match self {
            Self::Cors(_) => SettingsGroup::Cors,
            Self::Algorithm(_) => SettingsGroup::Algorithm,
            Self::Storage(_) => SettingsGroup::Storage,
        }
    }
}

impl From<CorsSettings> for GroupSettings {
    fn from(settings: CorsSettings) -> Self {
        Self::Cors(settings)
    }
}

impl From<AlgorithmSettings> for GroupSettings {
    fn from(settings: AlgorithmSettings) -> Self {
        Self::Algorithm(settings)
    }
}

impl From<StorageSettings> for GroupSettings {
    fn from(settings: StorageSettings) -> Self {
        Self::Storage(settings)
    }
}

/// All settings groups of the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSettings {
    /// CORS group
    pub cors: CorsSettings,
    /// Algorithm group
    pub algorithm: AlgorithmSettings,
    /// Storage group
    pub storage: StorageSettings,
}

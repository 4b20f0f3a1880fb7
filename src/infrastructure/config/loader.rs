use std::path::PathBuf;

use figment::error::Kind;
use figment::Figment;
use tracing::{debug, info};

use super::sources::GroupSource;
use crate::domain::error::{ConfigError, ConfigResult};
use crate::domain::models::{
    AlgorithmSettings, AppSettings, CorsSettings, GroupSettings, Settings, SettingsGroup,
    StorageSettings,
};

/// Settings loader reading the environment with a per-group env-file fallback
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    env_dir: PathBuf,
}

impl SettingsLoader {
    /// Loader resolving env-files against the current working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader resolving env-files against `dir`
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            env_dir: dir.into(),
        }
    }

    /// Path of the env-file consulted for `group`
    pub fn env_file_path(&self, group: SettingsGroup) -> PathBuf {
        self.env_dir.join(group.env_file())
    }

    /// Build one settings record
    ///
    /// Precedence (lowest to highest):
    /// 1. The group's env-file (`.env.cors`, `.env.algorithm`, `.env.storage`)
    /// 2. Environment variables, matched to field names ignoring case
    ///
    /// Every field is required. The record is built completely or not at all.
    pub fn load<S: Settings>(&self) -> ConfigResult<S> {
        let group = S::GROUP;
        let file = GroupSource::from_env_file(group, &self.env_file_path(group))?;
        let env = GroupSource::from_env(group);

        for field in group.fields() {
            let origin = if env.contains(field) {
                env.label()
            } else if file.contains(field) {
                file.label()
            } else {
                "unset"
            };
            debug!(group = %group, field, origin, "resolved settings field");
        }

        let settings = Figment::new()
            .merge(file)
            .merge(env)
            .extract::<S>()
            .map_err(|err| Self::map_error(group, err))?;

        info!(group = %group, "settings loaded");
        Ok(settings)
    }

    /// Build the record for a group chosen at runtime
    pub fn load_group(&self, group: SettingsGroup) -> ConfigResult<GroupSettings> {
        match group {
            SettingsGroup::Cors => self.load::<CorsSettings>().map(Into::into),
            SettingsGroup::Algorithm => self.load::<AlgorithmSettings>().map(Into::into),
            SettingsGroup::Storage => self.load::<StorageSettings>().map(Into::into),
        }
    }

    /// Build every settings group, failing on the first group that cannot load
    pub fn load_all(&self) -> ConfigResult<AppSettings> {
        Ok(AppSettings {
            cors: self.load()?,
            algorithm: self.load()?,
            storage: self.load()?,
        })
    }

    fn map_error(group: SettingsGroup, err: figment::Error) -> ConfigError {
        let missing = err.clone().into_iter().find_map(|e| match e.kind {
            Kind::MissingField(field) => Some(field.into_owned()),
            _ => None,
        });

        match missing {
            Some(field) => ConfigError::MissingField { group, field },
            None => ConfigError::Invalid {
                group,
                source: Box::new(err),
            },
        }
    }
}

impl AppSettings {
    /// Load every settings group from the environment and the env-files in
    /// the current working directory
    pub fn load() -> ConfigResult<Self> {
        SettingsLoader::new().load_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Environment with every settings variable removed, in both spellings
    fn cleared_env() -> Vec<(String, Option<String>)> {
        SettingsGroup::ALL
            .iter()
            .flat_map(|group| group.fields())
            .flat_map(|field| [field.to_string(), field.to_uppercase()])
            .map(|key| (key, None))
            .collect()
    }

    fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let mut env = cleared_env();
        env.retain(|(key, _)| !vars.iter().any(|(set, _)| *set == key.as_str()));
        env.extend(
            vars.iter()
                .map(|(key, value)| ((*key).to_string(), Some((*value).to_string()))),
        );
        temp_env::with_vars(env, f)
    }

    #[test]
    fn test_env_file_path() {
        let loader = SettingsLoader::with_dir("/etc/stego");
        assert_eq!(
            loader.env_file_path(SettingsGroup::Cors),
            PathBuf::from("/etc/stego/.env.cors")
        );
        assert_eq!(
            SettingsLoader::new().env_file_path(SettingsGroup::Storage),
            PathBuf::from(".env.storage")
        );
    }

    #[test]
    fn test_load_from_env_only() {
        let dir = TempDir::new().unwrap();
        let loader = SettingsLoader::with_dir(dir.path());

        let algorithm: AlgorithmSettings =
            with_env(&[("PREFIX", "<<"), ("SUFFIX", ">>")], || loader.load()).unwrap();

        assert_eq!(algorithm.prefix, "<<");
        assert_eq!(algorithm.suffix, ">>");
    }

    #[test]
    fn test_numeric_looking_values_stay_strings() {
        let dir = TempDir::new().unwrap();
        let loader = SettingsLoader::with_dir(dir.path());

        let algorithm: AlgorithmSettings =
            with_env(&[("PREFIX", "007"), ("SUFFIX", "true")], || loader.load()).unwrap();

        assert_eq!(algorithm.prefix, "007");
        assert_eq!(algorithm.suffix, "true");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".env.algorithm"),
            "PREFIX=file-prefix\nSUFFIX=file-suffix\n",
        )
        .unwrap();
        let loader = SettingsLoader::with_dir(dir.path());

        let algorithm: AlgorithmSettings =
            with_env(&[("PREFIX", "env-prefix")], || loader.load()).unwrap();

        assert_eq!(algorithm.prefix, "env-prefix", "Environment should win");
        assert_eq!(
            algorithm.suffix, "file-suffix",
            "File value should fill fields missing from the environment"
        );
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let dir = TempDir::new().unwrap();
        let loader = SettingsLoader::with_dir(dir.path());

        let result = with_env(&[("CLIENT_URL", "http://localhost:3000")], || {
            loader.load::<CorsSettings>()
        });

        match result {
            Err(ConfigError::MissingField { group, field }) => {
                assert_eq!(group, SettingsGroup::Cors);
                assert_eq!(field, "allowed_methods");
            }
            other => panic!("Expected MissingField error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_value_counts_as_present() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env.algorithm"), "PREFIX=\nSUFFIX=>>\n").unwrap();
        let loader = SettingsLoader::with_dir(dir.path());

        let algorithm: AlgorithmSettings = with_env(&[], || loader.load()).unwrap();

        assert_eq!(algorithm.prefix, "");
        assert_eq!(algorithm.suffix, ">>");
    }

    #[test]
    fn test_load_group_dispatches_on_group() {
        let dir = TempDir::new().unwrap();
        let loader = SettingsLoader::with_dir(dir.path());

        let settings = with_env(&[("ROOT_DIRECTORY", "/srv/stego")], || {
            loader.load_group(SettingsGroup::Storage)
        })
        .unwrap();

        assert_eq!(
            settings,
            GroupSettings::Storage(StorageSettings {
                root_directory: PathBuf::from("/srv/stego"),
            })
        );
    }

    #[test]
    fn test_load_all_fails_on_incomplete_group() {
        let dir = TempDir::new().unwrap();
        let loader = SettingsLoader::with_dir(dir.path());

        let result = with_env(
            &[
                ("CLIENT_URL", "http://localhost:3000"),
                ("ALLOWED_METHODS", "GET"),
                ("PREFIX", "<<"),
                ("SUFFIX", ">>"),
            ],
            || loader.load_all(),
        );

        let err = result.unwrap_err();
        assert!(err.is_missing_field());
        assert_eq!(err.group(), Some(SettingsGroup::Storage));
    }

    #[test]
    fn test_missing_field_message_points_at_sources() {
        let err = ConfigError::MissingField {
            group: SettingsGroup::Storage,
            field: "root_directory".to_string(),
        };
        let message = err.to_string();

        assert!(message.contains("ROOT_DIRECTORY"));
        assert!(message.contains(".env.storage"));
    }
}

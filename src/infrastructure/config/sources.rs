use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use figment::providers::Env;
use figment::value::{Dict, Map, Value};
use figment::{Metadata, Profile, Provider};
use tracing::debug;

use crate::domain::error::{ConfigError, ConfigResult};
use crate::domain::models::SettingsGroup;

/// Raw field values for one settings group, read from a single source
///
/// Keys are the group's canonical field names, so a source written as
/// `CLIENT_URL` and one written as `client_url` land on the same key.
/// Values stay strings; coercion happens during extraction.
#[derive(Debug, Clone)]
pub struct GroupSource {
    label: String,
    group: SettingsGroup,
    values: BTreeMap<&'static str, String>,
}

impl GroupSource {
    /// Collect the group's fields from the process environment
    pub fn from_env(group: SettingsGroup) -> Self {
        let env = Env::raw();
        let pairs = env
            .iter()
            .map(|(key, value)| (key.as_str().to_owned(), value));

        Self::collect("environment".to_string(), group, pairs)
    }

    /// Collect the group's fields from a dotenv-style file
    ///
    /// A missing file yields an empty source. `${NAME}` references expand;
    /// a `$` that does not open one is kept as written.
    pub fn from_env_file(group: SettingsGroup, path: &Path) -> ConfigResult<Self> {
        let label = format!("env file {}", path.display());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(group = %group, path = %path.display(), "env file not found, skipping");
                return Ok(Self::collect(label, group, std::iter::empty()));
            }
            Err(err) => {
                return Err(ConfigError::EnvFile {
                    path: path.to_path_buf(),
                    source: dotenvy::Error::Io(err),
                })
            }
        };

        let escaped = escape_bare_dollars(&content);
        let pairs = dotenvy::from_read_iter(escaped.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::collect(label, group, pairs))
    }

    fn collect(
        label: String,
        group: SettingsGroup,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let values = pairs
            .into_iter()
            .filter_map(|(key, value)| group.field_for_key(&key).map(|field| (field, value)))
            .collect();

        Self {
            label,
            group,
            values,
        }
    }

    /// Where the values came from, used in logs and error metadata
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this source sets `field`
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Raw value of `field`, if set
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// True when the source sets none of the group's fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Backslash-escape every `$` that does not open a `${NAME}` reference
///
/// dotenvy substitutes `$NAME` as well as `${NAME}`, which would turn a value
/// like `$STEGO$` into an empty string. Single-quoted text and comments are
/// copied unchanged since dotenvy never substitutes there.
fn escape_bare_dollars(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut prev = '\n';
    let (mut single, mut double, mut escaped, mut comment) = (false, false, false, false);

    while let Some(c) = chars.next() {
        if comment {
            comment = c != '\n';
        } else if single {
            single = c != '\'';
        } else if escaped {
            escaped = false;
        } else {
            match c {
                '\\' => escaped = true,
                '"' => double = !double,
                '\'' if !double => single = true,
                '#' if !double && prev.is_whitespace() => comment = true,
                '$' if chars.peek() != Some(&'{') => out.push('\\'),
                _ => {}
            }
        }
        out.push(c);
        prev = c;
    }

    out
}

impl Provider for GroupSource {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("{} ({} settings)", self.label, self.group))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let dict: Dict = self
            .values
            .iter()
            .map(|(field, value)| ((*field).to_string(), Value::from(value.clone())))
            .collect();

        Ok(Profile::Default.collect(dict))
    }
}

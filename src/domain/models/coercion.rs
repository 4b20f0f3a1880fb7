//! Lenient coercions for values that arrive as plain strings.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    Sequence(Vec<String>),
    Delimited(String),
}

/// Deserialize a list field from either a sequence or a delimited string.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match ListInput::deserialize(deserializer)? {
        ListInput::Sequence(items) => Ok(items),
        ListInput::Delimited(raw) => Ok(split_list(&raw)),
    }
}

/// Split a raw list value into its items, preserving order.
///
/// Accepts `GET,POST`, a JSON array such as `["GET","POST"]`, and the
/// bracketed form `[GET,POST]` left behind when dotenv parsing strips the
/// inner quotes. Items are trimmed and empty items dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return items;
        }
        return split_delimited(inner)
            .map(|item| item.trim_matches(&['"', '\''][..]).to_string())
            .filter(|item| !item.is_empty())
            .collect();
    }

    split_delimited(trimmed).map(str::to_string).collect()
}

fn split_delimited(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

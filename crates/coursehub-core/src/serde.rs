//! Deserializers for values arriving through query strings and form-style bodies.

use serde::{Deserialize, Deserializer};

/// Treats a missing, empty or whitespace-only string as `None`, trimming the rest.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

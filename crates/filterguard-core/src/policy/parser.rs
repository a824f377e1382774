//! Compact required-filter configuration grammar.
//!
//! ```text
//! config = entry ("," entry)*
//! entry  = collection ":" field
//! ```
//!
//! Whitespace around entries and tokens is ignored, as are empty entries
//! (so a trailing comma is harmless). Every other entry must split into
//! exactly two non-empty tokens.

use std::str::FromStr;

use super::registry::RequiredFilterRegistry;
use crate::error::ConfigError;

/// Separator between entries.
pub const ENTRY_SEPARATOR: char = ',';

/// Separator between the collection and field of an entry.
pub const FIELD_SEPARATOR: char = ':';

/// Parse an optional configuration string into a registry.
///
/// `None` means enforcement is not configured and yields an empty registry.
/// Any malformed entry fails the whole parse.
pub fn parse_required_filters(raw: Option<&str>) -> Result<RequiredFilterRegistry, ConfigError> {
    let Some(raw) = raw else {
        tracing::debug!("no required filters configured");
        return Ok(RequiredFilterRegistry::new());
    };

    let mut registry = RequiredFilterRegistry::new();
    for entry in raw.split(ENTRY_SEPARATOR).map(str::trim) {
        if entry.is_empty() {
            continue;
        }
        let (collection, field) = parse_entry(entry)?;
        registry.require(collection, field);
    }

    registry.log_loaded();
    Ok(registry)
}

fn parse_entry(entry: &str) -> Result<(&str, &str), ConfigError> {
    let tokens: Vec<&str> = entry.split(FIELD_SEPARATOR).map(str::trim).collect();
    match tokens.as_slice() {
        &[collection, field] => {
            if collection.is_empty() {
                Err(ConfigError::malformed(entry, "empty collection name"))
            } else if field.is_empty() {
                Err(ConfigError::malformed(entry, "empty field name"))
            } else {
                Ok((collection, field))
            }
        }
        [_] => Err(ConfigError::malformed(
            entry,
            format!("missing '{}' separator", FIELD_SEPARATOR),
        )),
        _ => Err(ConfigError::malformed(
            entry,
            format!("expected exactly one '{}' separator", FIELD_SEPARATOR),
        )),
    }
}

impl FromStr for RequiredFilterRegistry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_required_filters(Some(s))
    }
}

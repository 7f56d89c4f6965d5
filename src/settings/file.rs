//! User property files
//!
//! A property file is a flat JSON object mapping property names to values.
//! Strings, numbers and booleans are accepted; everything is stored as a
//! string and validated when read.

use super::registry::PropertyReader;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read property file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse property file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a JSON property object into a reader
pub fn reader_from_json(json: &str) -> Result<PropertyReader, ConfigError> {
    let config_map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

    let mut values = HashMap::new();
    for (key, value) in config_map {
        let value_str = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => {
                log::warn!("Ignoring property '{}': value must be a string, number or bool", key);
                continue;
            }
        };
        values.insert(key, value_str);
    }

    Ok(PropertyReader::new(values))
}

/// Load a property file, or an empty reader (all defaults) when `path` is None
pub fn load_reader(path: Option<&Path>) -> Result<PropertyReader, ConfigError> {
    match path {
        Some(p) => {
            let json = std::fs::read_to_string(p).map_err(|source| ConfigError::Io {
                path: p.display().to_string(),
                source,
            })?;
            let reader = reader_from_json(&json)?;
            log::info!("Loaded properties from {}", p.display());
            Ok(reader)
        }
        None => {
            log::info!("No property file given, using defaults");
            Ok(PropertyReader::default())
        }
    }
}

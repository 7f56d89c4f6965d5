//! Property definitions with defaults from properties.json
//!
//! properties.json is embedded at compile time so defaults are defined in one
//! place. `PropertyReader` layers user values over those defaults with
//! validation.

use std::collections::HashMap;

/// properties.json embedded at compile time
const PROPERTIES_JSON: &str = include_str!("../../properties.json");

/// Property definition from properties.json
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    pub default_value: String,
    /// For EnumeratedProperty, the valid values
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String,
    Enumerated,
    Boolean,
    Double,
}

/// Registry of all properties with their defaults
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse properties.json and build the registry
    ///
    /// Panics if the embedded file is malformed.
    pub fn from_properties_json() -> Self {
        Self::from_json(PROPERTIES_JSON).expect("embedded properties.json is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let json: serde_json::Value =
            serde_json::from_str(json).map_err(|e| format!("invalid JSON: {}", e))?;

        let properties_array = json["properties"]
            .as_array()
            .ok_or("missing 'properties' array")?;

        let mut properties = HashMap::new();

        for prop in properties_array {
            let name = prop["name"]
                .as_str()
                .ok_or("property missing 'name'")?
                .to_string();

            let kind = match prop["kind"].as_str() {
                Some("StringProperty") => PropertyKind::String,
                Some("EnumeratedProperty") => PropertyKind::Enumerated,
                Some("BooleanProperty") => PropertyKind::Boolean,
                Some("DoubleProperty") => PropertyKind::Double,
                other => return Err(format!("unknown kind {:?} for '{}'", other, name)),
            };

            let default_value = prop["defaultValue"].as_str().unwrap_or("").to_string();

            let valid_values = if kind == PropertyKind::Enumerated {
                prop["values"].as_array().map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect()
                })
            } else {
                None
            };

            properties.insert(
                name.clone(),
                PropertyDef {
                    name,
                    kind,
                    default_value,
                    valid_values,
                },
            );
        }

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

/// Global registry instance (initialized lazily)
static REGISTRY: std::sync::OnceLock<PropertyRegistry> = std::sync::OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(PropertyRegistry::from_properties_json)
}

/// Typed property reader
///
/// User values take precedence; anything missing, empty or invalid falls
/// back to the properties.json default with a warning.
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    /// Create from user-set values (empty values count as unset)
    pub fn new(values: HashMap<String, String>) -> Self {
        let reg = registry();
        let user_values = values
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .filter(|(name, _)| {
                let known = reg.get_property(name).is_some();
                if !known {
                    log::warn!("Ignoring unknown property '{}'", name);
                }
                known
            })
            .collect();

        Self { user_values }
    }

    /// Override one value (command-line flags)
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.user_values.insert(name.to_string(), value.into());
    }

    /// Get string property (user value or default)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get enumerated property with validation
    ///
    /// Returns the canonical spelling from properties.json.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            let canonical = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .and_then(|values| values.iter().find(|v| v.eq_ignore_ascii_case(value)));

            match canonical {
                Some(v) => return v.clone(),
                None if reg.is_valid_enum_value(name, value) => return value.clone(),
                None => {
                    let valid_values = reg
                        .get_property(name)
                        .and_then(|p| p.valid_values.as_ref())
                        .map(|v| v.join(", "))
                        .unwrap_or_default();
                    log::warn!(
                        "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                        value,
                        name,
                        valid_values,
                        default
                    );
                }
            }
        }

        default.to_string()
    }

    /// Get f64 property, falling back to the default on parse failure
    pub fn get_f64(&self, name: &str) -> f64 {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        match self.user_values.get(name) {
            None => default,
            Some(value) => match value.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    log::warn!(
                        "Invalid numeric value '{}' for property '{}'. Using default: {}",
                        value,
                        name,
                        default
                    );
                    default
                }
            },
        }
    }

    /// Get f64 property within `(min, max]`
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let value = self.get_f64(name);
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        if value > min && value <= max {
            value
        } else {
            log::warn!(
                "Value {} for property '{}' out of range ({}, {}]. Using default: {}",
                value,
                name,
                min,
                max,
                default
            );
            default
        }
    }

    /// Get boolean property ("true"/"false", also yes/no and 1/0)
    pub fn get_bool(&self, name: &str) -> bool {
        let default = registry()
            .get_default(name)
            .and_then(super::properties::parse_bool)
            .unwrap_or(false);

        match self.user_values.get(name) {
            None => default,
            Some(value) => super::properties::parse_bool(value).unwrap_or_else(|| {
                log::warn!(
                    "Invalid boolean value '{}' for property '{}'. Using default: {}",
                    value,
                    name,
                    default
                );
                default
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(pairs: &[(&str, &str)]) -> PropertyReader {
        PropertyReader::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_registry_loads() {
        let reg = registry();
        assert!(reg.get_property("map.dir").is_some());
        assert!(reg.get_property("plot.palette").is_some());
        assert!(reg.get_property("box.length").is_some());
        assert_eq!(
            reg.get_property("plot.circle").map(|p| &p.kind),
            Some(&PropertyKind::Boolean)
        );
    }

    #[test]
    fn test_registry_defaults() {
        let reg = registry();
        assert_eq!(reg.get_default("map.scaling"), Some("0.86"));
        assert_eq!(reg.get_default("grid.step"), Some("0.01"));
        assert_eq!(reg.get_default("output.dir"), Some("out"));
    }

    #[test]
    fn test_enum_validation() {
        let reg = registry();
        assert!(reg.is_valid_enum_value("map.interpolation", "nearest"));
        assert!(reg.is_valid_enum_value("plot.palette", "viridis"));
        assert!(!reg.is_valid_enum_value("stats.aperture", "hexagon"));
        assert!(reg.is_valid_enum_value("map.dir", "anything"));
    }

    #[test]
    fn test_reader_defaults() {
        let r = PropertyReader::default();
        assert_eq!(r.get_enum("stats.aperture"), "box");
        assert_eq!(r.get_f64("box.length"), 1.0);
        assert!(r.get_bool("plot.circle"));
        assert_eq!(r.get_string("plot.font"), "");
    }

    #[test]
    fn test_reader_user_values() {
        let r = reader(&[
            ("plot.palette", "magma"),
            ("box.length", "0.5"),
            ("plot.circle", "false"),
            ("output.dir", "figures"),
        ]);
        assert_eq!(r.get_enum("plot.palette"), "Magma");
        assert_eq!(r.get_f64("box.length"), 0.5);
        assert!(!r.get_bool("plot.circle"));
        assert_eq!(r.get_string("output.dir"), "figures");
    }

    #[test]
    fn test_reader_invalid_values_fall_back() {
        let r = reader(&[
            ("stats.aperture", "hexagon"),
            ("grid.step", "fast"),
            ("plot.enabled", "maybe"),
        ]);
        assert_eq!(r.get_enum("stats.aperture"), "box");
        assert_eq!(r.get_f64("grid.step"), 0.01);
        assert!(r.get_bool("plot.enabled"));
    }

    #[test]
    fn test_range_check() {
        let r = reader(&[("grid.step", "-1")]);
        assert_eq!(r.get_f64_in_range("grid.step", 0.0, 5.0), 0.01);
        let r = reader(&[("grid.step", "0.05")]);
        assert_eq!(r.get_f64_in_range("grid.step", 0.0, 5.0), 0.05);
    }

    #[test]
    fn test_unknown_and_empty_values_ignored() {
        let mut r = reader(&[("no.such.property", "1"), ("output.suffix", "")]);
        assert_eq!(r.get_string("output.suffix"), "_SFD");
        r.set("output.suffix", "_ebv");
        assert_eq!(r.get_string("output.suffix"), "_ebv");
    }

    #[test]
    fn test_malformed_registry_json() {
        assert!(PropertyRegistry::from_json("{}").is_err());
        assert!(PropertyRegistry::from_json(r#"{"properties": [{"name": "a", "kind": "Blob"}]}"#).is_err());
    }
}

//! Target lists
//!
//! A target is a named sky position with a region radius in arcminutes.
//! Lists are JSON arrays; the default list is embedded at compile time.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Embedded default target list
const DEFAULT_TARGETS_JSON: &str = include_str!("../targets/default.json");

/// Region radius used when a target does not give one
pub const DEFAULT_RADIUS_ARCMIN: f64 = 5.0;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Failed to read target list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse target list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid target '{name}': {reason}")]
    Invalid { name: String, reason: String },

    #[error("Duplicate target name '{0}'")]
    Duplicate(String),

    #[error("Target list is empty")]
    Empty,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_ARCMIN
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Target {
    pub name: String,
    /// Right ascension (or galactic longitude), degrees
    pub ra: f64,
    /// Declination (or galactic latitude), degrees
    pub dec: f64,
    #[serde(rename = "radius", default = "default_radius")]
    pub radius_arcmin: f64,
}

impl Target {
    pub fn new(name: impl Into<String>, ra: f64, dec: f64, radius_arcmin: f64) -> Self {
        Self {
            name: name.into(),
            ra,
            dec,
            radius_arcmin,
        }
    }

    /// Region radius in degrees
    pub fn radius_deg(&self) -> f64 {
        self.radius_arcmin / 60.0
    }

    fn validate(&self) -> Result<(), TargetError> {
        let invalid = |reason: &str| TargetError::Invalid {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        let name = self.name.trim();
        if name.is_empty() {
            return Err(invalid("empty name"));
        }
        // Names become output file names
        if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
            return Err(invalid("name is not usable as a file name"));
        }
        if !self.ra.is_finite() || !self.dec.is_finite() || self.dec.abs() > 90.0 {
            return Err(invalid("coordinates out of range"));
        }
        if !self.radius_arcmin.is_finite() || self.radius_arcmin <= 0.0 {
            return Err(invalid("radius must be positive"));
        }
        Ok(())
    }
}

/// Parse and validate a JSON target list
pub fn parse_targets(json: &str) -> Result<Vec<Target>, TargetError> {
    let targets: Vec<Target> = serde_json::from_str(json)?;
    if targets.is_empty() {
        return Err(TargetError::Empty);
    }

    let mut seen = HashSet::new();
    for target in &targets {
        target.validate()?;
        if !seen.insert(target.name.as_str()) {
            return Err(TargetError::Duplicate(target.name.clone()));
        }
    }
    Ok(targets)
}

/// Load targets from a file, or the embedded list when `path` is None
pub fn load_targets(path: Option<&Path>) -> Result<Vec<Target>, TargetError> {
    match path {
        Some(p) => {
            let json = std::fs::read_to_string(p).map_err(|source| TargetError::Io {
                path: p.display().to_string(),
                source,
            })?;
            let targets = parse_targets(&json)?;
            log::info!("Loaded {} target(s) from {}", targets.len(), p.display());
            Ok(targets)
        }
        None => {
            let targets = parse_targets(DEFAULT_TARGETS_JSON)?;
            log::info!("Using {} built-in target(s)", targets.len());
            Ok(targets)
        }
    }
}

//! Palette registry for heatmap colour maps
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name.
//!
//! Palette types:
//! - `sequential`: Gradient from low to high values
//! - `diverging`: Gradient with a neutral midpoint

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        log::error!("Failed to load palettes.json: {}", e);
        PaletteRegistry::default()
    })
});

/// Default palette name
pub const DEFAULT_PALETTE: &str = "Viridis";

/// Colour used when no palette is available
const FALLBACK_GRAY: [u8; 3] = [128, 128, 128];

/// Palette type as defined in palettes.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Sequential,
    Diverging,
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub palette_type: PaletteType,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color by index (clamped to the last stop)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        match self.colors.get(index.min(self.colors.len().saturating_sub(1))) {
            Some(hex) => parse_hex_color(hex).unwrap_or(FALLBACK_GRAY),
            None => FALLBACK_GRAY,
        }
    }

    /// Interpolate a color from the palette at position t ∈ [0, 1]
    ///
    /// t=0 returns the first color, t=1 returns the last color.
    /// Values in between are linearly interpolated; NaN maps to the first.
    pub fn interpolate(&self, t: f64) -> [u8; 3] {
        if self.colors.is_empty() {
            return FALLBACK_GRAY;
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.colors.len();

        if n == 1 {
            return self.get_color(0);
        }

        let pos = t * (n - 1) as f64;
        let idx_low = pos.floor() as usize;
        let idx_high = (idx_low + 1).min(n - 1);
        let frac = pos - idx_low as f64;

        let color_low = self.get_color(idx_low);
        let color_high = self.get_color(idx_high);

        let mix = |a: u8, b: u8| (a as f64 * (1.0 - frac) + b as f64 * frac).round() as u8;
        [
            mix(color_low[0], color_high[0]),
            mix(color_low[1], color_high[1]),
            mix(color_low[2], color_high[2]),
        ]
    }

    /// Map a value in [min, max] to a color
    pub fn map_value(&self, value: f64, min: f64, max: f64) -> [u8; 3] {
        let span = max - min;
        let t = if span > 0.0 { (value - min) / span } else { 0.5 };
        self.interpolate(t)
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();
        for def in definitions {
            registry.palettes.insert(def.name.to_lowercase(), def);
        }

        log::debug!("Loaded {} palettes", registry.palettes.len());
        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    /// Get a palette by name, falling back to the default palette
    pub fn get_or_default(&self, name: &str) -> Option<&PaletteDefinition> {
        self.get(name).or_else(|| {
            log::warn!("Unknown palette '{}', using {}", name, DEFAULT_PALETTE);
            self.get(DEFAULT_PALETTE)
        })
    }
}

/// Parse a hex color string to RGB array
///
/// Supports formats:
/// - `#RRGGBB` (6 hex digits)
/// - `#RRGGBBAA` (8 hex digits, alpha ignored)
/// - `RRGGBB` / `RRGGBBAA` (without #)
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        log::warn!("Invalid hex color '{}'", hex);
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

//! Diagnostic figure rendering
//!
//! - `palettes.rs`: embedded colour maps
//! - `fonts.rs`: runtime font registration for titles and labels
//! - `figure.rs`: heatmap, overlays and colour bar

pub mod figure;
pub mod fonts;
pub mod palettes;

pub use figure::{render_png, FigureSpec};
pub use palettes::{PaletteDefinition, PALETTE_REGISTRY};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Font file unreadable or not a TrueType/OpenType font
    #[error("Failed to load font {path}: {reason}")]
    Font { path: String, reason: String },

    /// Backend or layout failure
    #[error("Drawing failed: {0}")]
    Drawing(String),

    /// Grid has no rows, no columns or no finite values
    #[error("Nothing to draw: {0}")]
    EmptyField(String),

    /// Palette name not in palettes.json
    #[error("Unknown palette '{0}'")]
    UnknownPalette(String),
}

//! SFD98 dust map queries
//!
//! Looks up E(B-V) reddening in the Schlegel, Finkbeiner & Davis (1998)
//! mosaics around a list of targets, prints per-target statistics and renders
//! a diagnostic figure per target.
//!
//! Module organization:
//! - `dustmap`: FITS hemispheres, coordinate conversion and pixel lookup
//! - `sampling`: regular RA/Dec grids around a centre
//! - `stats`: median / min / max over a region
//! - `render`: heatmap figures
//! - `targets`: target lists
//! - `settings`, `config`: property registry and typed configuration
//! - `pipeline`: per-target processing loop

pub mod config;
pub mod dustmap;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod sampling;
pub mod settings;
pub mod stats;
pub mod targets;

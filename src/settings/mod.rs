//! Property handling
//!
//! - `registry.rs`: embedded property definitions and the typed reader
//! - `properties.rs`: value parsing (booleans, plot dimensions)
//! - `file.rs`: user property files

pub mod file;
pub mod properties;
pub mod registry;

pub use file::{load_reader, reader_from_json, ConfigError};
pub use properties::{parse_bool, PlotDimension};
pub use registry::{registry, PropertyReader};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or querying the dust map
#[derive(Debug, Error)]
pub enum DustMapError {
    /// Map file could not be opened or read
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a usable FITS image
    #[error("Invalid FITS file {path}: {reason}")]
    Fits { path: PathBuf, reason: String },

    /// Required header keyword absent or not numeric
    #[error("Missing header keyword '{keyword}' in {path}")]
    MissingKeyword { path: PathBuf, keyword: String },

    /// Pixel data type not handled (only float and int32 images are)
    #[error("Unsupported pixel data in {path}: {kind}")]
    UnsupportedData { path: PathBuf, kind: String },

    /// Header dimensions do not match the pixel count
    #[error("Shape mismatch in {path}: header says {nx}x{ny}, found {len} pixels")]
    ShapeMismatch {
        path: PathBuf,
        nx: usize,
        ny: usize,
        len: usize,
    },

    /// Latitude out of [-90, 90] or non-finite coordinate
    #[error("Invalid coordinate ({lon}, {lat})")]
    InvalidCoordinate { lon: f64, lat: f64 },
}

/// Type alias for Results using DustMapError
pub type Result<T> = std::result::Result<T, DustMapError>;

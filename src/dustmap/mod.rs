//! SFD98 dust map access
//!
//! Structure:
//! - `coords.rs`: ICRS to galactic conversion
//! - `fits_io.rs`: FITS header and pixel reading
//! - `hemisphere.rs`: Lambert projection and pixel interpolation
//! - `map.rs`: two-hemisphere map and the `ExtinctionSource` trait
//! - `error.rs`: Error types

pub mod coords;
pub mod error;
pub mod fits_io;
pub mod hemisphere;
pub mod map;

pub use coords::{to_galactic, CoordFrame, Galactic};
pub use error::{DustMapError, Result};
pub use hemisphere::{Hemisphere, Interpolation};
pub use map::{ExtinctionSource, MapConfig, SfdMap};

//! Sky coordinate handling
//!
//! The SFD mosaics are indexed by galactic longitude/latitude. Inputs are
//! ICRS (J2000) right ascension/declination in degrees unless the frame says
//! they are already galactic.

use super::error::{DustMapError, Result};
use std::f64::consts::TAU;

/// Rotation from ICRS equatorial unit vectors to galactic unit vectors
const ICRS_TO_GALACTIC: [[f64; 3]; 3] = [
    [-0.054_875_560_416_215_4, -0.873_437_090_234_885_0, -0.483_835_015_548_713_2],
    [0.494_109_427_875_583_7, -0.444_829_629_960_011_2, 0.746_982_244_497_218_9],
    [-0.867_666_149_019_004_7, -0.198_076_373_431_201_5, 0.455_983_776_175_066_9],
];

/// Reference frame of input coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordFrame {
    /// ICRS / J2000 right ascension and declination
    #[default]
    Icrs,
    /// Galactic longitude and latitude
    Galactic,
}

impl CoordFrame {
    /// Parse from string value
    ///
    /// Validation happens in the property reader, anything else is ICRS.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "galactic" => Self::Galactic,
            _ => Self::Icrs,
        }
    }
}

/// Galactic position in radians, longitude in [0, 2π)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Galactic {
    pub l: f64,
    pub b: f64,
}

/// Convert a coordinate pair in degrees to galactic radians
pub fn to_galactic(lon_deg: f64, lat_deg: f64, frame: CoordFrame) -> Result<Galactic> {
    if !lon_deg.is_finite() || !lat_deg.is_finite() || lat_deg.abs() > 90.0 {
        return Err(DustMapError::InvalidCoordinate {
            lon: lon_deg,
            lat: lat_deg,
        });
    }

    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();

    match frame {
        CoordFrame::Galactic => Ok(Galactic {
            l: lon.rem_euclid(TAU),
            b: lat,
        }),
        CoordFrame::Icrs => Ok(icrs_to_galactic(lon, lat)),
    }
}

fn icrs_to_galactic(ra: f64, dec: f64) -> Galactic {
    let v = [dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin()];
    let m = &ICRS_TO_GALACTIC;

    let x = m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2];
    let y = m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2];
    let z = m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2];

    Galactic {
        l: y.atan2(x).rem_euclid(TAU),
        b: z.clamp(-1.0, 1.0).asin(),
    }
}

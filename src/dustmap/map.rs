//! Two-hemisphere SFD map and the query trait used by the sampler

use super::coords::{to_galactic, CoordFrame};
use super::error::Result;
use super::hemisphere::{Hemisphere, Interpolation};
use std::path::PathBuf;

/// Default file name of the north galactic pole mosaic
pub const DEFAULT_NORTH_FILE: &str = "SFD_dust_4096_ngp.fits";

/// Default file name of the south galactic pole mosaic
pub const DEFAULT_SOUTH_FILE: &str = "SFD_dust_4096_sgp.fits";

/// Schlafly & Finkbeiner (2011) recalibration factor
pub const DEFAULT_SCALING: f64 = 0.86;

/// Anything that can report E(B-V) at a sky position
///
/// The sampler is generic over this so it can run against synthetic sources.
pub trait ExtinctionSource {
    /// E(B-V) at one position (degrees)
    fn ebv(&self, lon: f64, lat: f64) -> Result<f64>;

    /// E(B-V) along a column of latitudes at one longitude
    fn ebv_column(&self, lon: f64, lats: &[f64]) -> Result<Vec<f64>> {
        lats.iter().map(|&lat| self.ebv(lon, lat)).collect()
    }
}

/// Where and how to load the map
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub dir: PathBuf,
    pub north: String,
    pub south: String,
    pub scaling: f64,
    pub interpolation: Interpolation,
    pub frame: CoordFrame,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("sfddata-master"),
            north: DEFAULT_NORTH_FILE.to_string(),
            south: DEFAULT_SOUTH_FILE.to_string(),
            scaling: DEFAULT_SCALING,
            interpolation: Interpolation::Bilinear,
            frame: CoordFrame::Icrs,
        }
    }
}

/// The SFD98 reddening map held in memory
pub struct SfdMap {
    north: Hemisphere,
    south: Hemisphere,
    interpolation: Interpolation,
    frame: CoordFrame,
}

impl SfdMap {
    /// Load both hemispheres from `config.dir`
    pub fn open(config: &MapConfig) -> Result<Self> {
        let north_path = config.dir.join(&config.north);
        let south_path = config.dir.join(&config.south);

        log::info!("Loading dust map from {}", config.dir.display());
        let north = Hemisphere::load(&north_path, config.scaling)?;
        let south = Hemisphere::load(&south_path, config.scaling)?;

        if north.sign() < 0.0 || south.sign() > 0.0 {
            log::warn!(
                "Hemisphere headers look swapped (north LAM_NSGP={}, south LAM_NSGP={})",
                north.sign(),
                south.sign()
            );
        }

        log::info!(
            "Dust map loaded (north {:?}, south {:?}, scaling {}, {:?})",
            north.shape(),
            south.shape(),
            config.scaling,
            config.interpolation
        );

        Ok(Self::from_hemispheres(
            north,
            south,
            config.interpolation,
            config.frame,
        ))
    }

    pub fn from_hemispheres(
        north: Hemisphere,
        south: Hemisphere,
        interpolation: Interpolation,
        frame: CoordFrame,
    ) -> Self {
        Self {
            north,
            south,
            interpolation,
            frame,
        }
    }
}

impl ExtinctionSource for SfdMap {
    fn ebv(&self, lon: f64, lat: f64) -> Result<f64> {
        let pos = to_galactic(lon, lat, self.frame)?;
        let hemisphere = if pos.b >= 0.0 {
            &self.north
        } else {
            &self.south
        };
        Ok(hemisphere.ebv(pos, self.interpolation))
    }
}

//! One hemisphere of the SFD mosaic
//!
//! Each hemisphere is a Lambert zenithal equal-area projection centred on a
//! galactic pole. The header carries the projection centre (CRPIX1/2), the
//! scale (LAM_SCAL) and which pole it is (LAM_NSGP: +1 north, -1 south).

use super::coords::Galactic;
use super::error::{DustMapError, Result};
use super::fits_io;
use std::path::Path;

/// How map values are read at fractional pixel positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Weighted average of the four surrounding pixels
    #[default]
    Bilinear,
    /// Value of the nearest pixel
    Nearest,
}

impl Interpolation {
    /// Parse from string value
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "nearest" => Self::Nearest,
            _ => Self::Bilinear,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Hemisphere {
    nx: usize,
    ny: usize,
    data: Vec<f32>,
    crpix1: f64,
    crpix2: f64,
    lam_scal: f64,
    sign: f64,
}

impl Hemisphere {
    /// Load a hemisphere mosaic, applying `scaling` to every pixel
    pub fn load(path: &Path, scaling: f64) -> Result<Self> {
        let hdu = fits_io::open_primary(path)?;

        let crpix1 = fits_io::header_f64(&hdu, path, "CRPIX1")?;
        let crpix2 = fits_io::header_f64(&hdu, path, "CRPIX2")?;
        let lam_scal = fits_io::header_f64(&hdu, path, "LAM_SCAL")?;
        let sign = fits_io::header_f64(&hdu, path, "LAM_NSGP")?;

        if sign != 1.0 && sign != -1.0 {
            return Err(DustMapError::Fits {
                path: path.to_path_buf(),
                reason: format!("LAM_NSGP must be 1 or -1, found {}", sign),
            });
        }

        let image = fits_io::read_image(&hdu, path, scaling)?;

        log::debug!(
            "Loaded {} ({}x{}, CRPIX=({}, {}), LAM_SCAL={}, LAM_NSGP={})",
            path.display(),
            image.nx,
            image.ny,
            crpix1,
            crpix2,
            lam_scal,
            sign
        );

        Ok(Self {
            nx: image.nx,
            ny: image.ny,
            data: image.data,
            crpix1,
            crpix2,
            lam_scal,
            sign,
        })
    }

    /// +1 for the north galactic pole map, -1 for the south
    pub fn sign(&self) -> f64 {
        self.sign
    }

    /// Image dimensions (NAXIS1, NAXIS2)
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Zero-based fractional pixel position of a galactic coordinate
    pub fn project(&self, pos: Galactic) -> (f64, f64) {
        let r = self.lam_scal * (1.0 - self.sign * pos.b.sin()).max(0.0).sqrt();
        let x = self.crpix1 - 1.0 + r * pos.l.cos();
        let y = self.crpix2 - 1.0 - self.sign * r * pos.l.sin();
        (x, y)
    }

    /// Map value at a galactic coordinate
    pub fn ebv(&self, pos: Galactic, interpolation: Interpolation) -> f64 {
        let (x, y) = self.project(pos);
        match interpolation {
            Interpolation::Bilinear => self.bilinear(x, y),
            Interpolation::Nearest => self.nearest(x, y),
        }
    }

    fn pixel(&self, x: usize, y: usize) -> f64 {
        f64::from(self.data[y * self.nx + x])
    }

    fn clamp_index(v: f64, n: usize) -> usize {
        if v <= 0.0 {
            0
        } else {
            (v as usize).min(n - 1)
        }
    }

    fn nearest(&self, x: f64, y: f64) -> f64 {
        // Valid positions can land exactly on the far border
        let xi = Self::clamp_index(x.round(), self.nx);
        let yi = Self::clamp_index(y.round(), self.ny);
        self.pixel(xi, yi)
    }

    fn bilinear(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let xw = x - xf;
        let yw = y - yf;

        let x0 = Self::clamp_index(xf, self.nx);
        let x1 = Self::clamp_index(xf + 1.0, self.nx);
        let y0 = Self::clamp_index(yf, self.ny);
        let y1 = Self::clamp_index(yf + 1.0, self.ny);

        (1.0 - xw) * (1.0 - yw) * self.pixel(x0, y0)
            + xw * (1.0 - yw) * self.pixel(x1, y0)
            + (1.0 - xw) * yw * self.pixel(x0, y1)
            + xw * yw * self.pixel(x1, y1)
    }
}

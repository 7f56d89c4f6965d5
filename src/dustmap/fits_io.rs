//! Thin helpers over `fitrs` for reading a primary image HDU

use super::error::{DustMapError, Result};
use fitrs::{Fits, FitsData, FitsDataArray, Hdu, HeaderValue};
use std::path::Path;

/// Open a FITS file and return its primary HDU
pub fn open_primary(path: &Path) -> Result<Hdu> {
    let fits = Fits::open(path).map_err(|source| DustMapError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    fits.get(0).ok_or_else(|| DustMapError::Fits {
        path: path.to_path_buf(),
        reason: "no primary HDU".to_string(),
    })
}

/// Read a numeric header keyword (integer or real)
pub fn header_f64(hdu: &Hdu, path: &Path, keyword: &str) -> Result<f64> {
    match hdu.value(keyword) {
        Some(HeaderValue::IntegerNumber(n)) => Ok(f64::from(*n)),
        Some(HeaderValue::RealFloatingNumber(x)) => Ok(*x),
        _ => Err(DustMapError::MissingKeyword {
            path: path.to_path_buf(),
            keyword: keyword.to_string(),
        }),
    }
}

/// Read a positive integer header keyword such as NAXISn
pub fn header_usize(hdu: &Hdu, path: &Path, keyword: &str) -> Result<usize> {
    match hdu.value(keyword) {
        Some(HeaderValue::IntegerNumber(n)) if *n > 0 => Ok(*n as usize),
        _ => Err(DustMapError::MissingKeyword {
            path: path.to_path_buf(),
            keyword: keyword.to_string(),
        }),
    }
}

/// Image pixels in file order (NAXIS1 varies fastest)
#[derive(Debug, Clone)]
pub struct ImagePixels {
    pub nx: usize,
    pub ny: usize,
    pub data: Vec<f32>,
}

/// Read a 2-D image, multiplying every pixel by `scaling`
///
/// Blank integer pixels become NaN.
pub fn read_image(hdu: &Hdu, path: &Path, scaling: f64) -> Result<ImagePixels> {
    let nx = header_usize(hdu, path, "NAXIS1")?;
    let ny = header_usize(hdu, path, "NAXIS2")?;
    let scale = scaling as f32;

    let data: Vec<f32> = match hdu.read_data() {
        FitsData::FloatingPoint32(FitsDataArray { data, .. }) => {
            data.iter().map(|&v| v * scale).collect()
        }
        FitsData::FloatingPoint64(FitsDataArray { data, .. }) => {
            data.iter().map(|&v| (v * scaling) as f32).collect()
        }
        FitsData::IntegersI32(FitsDataArray { data, .. }) => data
            .iter()
            .map(|v| match v {
                Some(n) => (f64::from(*n) * scaling) as f32,
                None => f32::NAN,
            })
            .collect(),
        _ => {
            return Err(DustMapError::UnsupportedData {
                path: path.to_path_buf(),
                kind: "expected floating point or 32-bit integer image".to_string(),
            })
        }
    };

    if data.len() != nx * ny {
        return Err(DustMapError::ShapeMismatch {
            path: path.to_path_buf(),
            nx,
            ny,
            len: data.len(),
        });
    }

    Ok(ImagePixels { nx, ny, data })
}

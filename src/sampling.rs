//! Regular grid sampling of the dust map around a target
//!
//! The map is queried once per right-ascension value with the full
//! declination axis; columns are then transposed into a row-major grid with
//! rows along declination and columns along right ascension.

use crate::dustmap::{ExtinctionSource, Result};

/// Fixed-step half-open range `[start, stop)`
///
/// Length is `ceil((stop - start) / step)`; empty when `stop <= start` or the
/// step is not positive.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || (stop - start).is_nan() || stop <= start {
        return Vec::new();
    }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// E(B-V) values on a regular RA/Dec grid
#[derive(Debug, Clone)]
pub struct FieldGrid {
    /// Grid centre (ra, dec) in degrees
    pub center: (f64, f64),
    /// Half-width of the sampled box in degrees
    pub half_width: f64,
    /// Column coordinates
    pub ra: Vec<f64>,
    /// Row coordinates
    pub dec: Vec<f64>,
    /// Row-major values, `dec.len()` rows by `ra.len()` columns
    values: Vec<f64>,
}

impl FieldGrid {
    /// Build from a row-major value array
    ///
    /// Panics if `values.len() != dec.len() * ra.len()`.
    pub fn new(
        center: (f64, f64),
        half_width: f64,
        ra: Vec<f64>,
        dec: Vec<f64>,
        values: Vec<f64>,
    ) -> Self {
        assert_eq!(values.len(), ra.len() * dec.len(), "grid shape mismatch");
        Self {
            center,
            half_width,
            ra,
            dec,
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.dec.len()
    }

    pub fn cols(&self) -> usize {
        self.ra.len()
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols() + col]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values with their flat offsets (dra, ddec) from the centre
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        let (cx, cy) = self.center;
        self.dec.iter().enumerate().flat_map(move |(row, &dec)| {
            self.ra
                .iter()
                .enumerate()
                .map(move |(col, &ra)| (ra - cx, dec - cy, self.get(row, col)))
        })
    }

    /// Finite (min, max) of the grid, None when nothing is finite
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Sample a square box of half-width `half_width` around (ra, dec)
pub fn sample_box<S: ExtinctionSource + ?Sized>(
    source: &S,
    ra: f64,
    dec: f64,
    half_width: f64,
    step: f64,
) -> Result<FieldGrid> {
    let ra_axis = arange(ra - half_width, ra + half_width, step);
    let dec_axis = arange(dec - half_width, dec + half_width, step);

    let mut columns = Vec::with_capacity(ra_axis.len());
    for &x in &ra_axis {
        columns.push(source.ebv_column(x, &dec_axis)?);
    }

    let mut values = Vec::with_capacity(ra_axis.len() * dec_axis.len());
    for row in 0..dec_axis.len() {
        for column in &columns {
            values.push(column[row]);
        }
    }

    log::debug!(
        "Sampled {}x{} grid around ({:.4}, {:.4}), half-width {}",
        dec_axis.len(),
        ra_axis.len(),
        ra,
        dec,
        half_width
    );

    Ok(FieldGrid::new(
        (ra, dec),
        half_width,
        ra_axis,
        dec_axis,
        values,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dustmap::DustMapError;
    use std::cell::Cell;

    /// value = 10 * lon + lat, counts column queries
    struct LinearSource {
        columns: Cell<usize>,
    }

    impl LinearSource {
        fn new() -> Self {
            Self {
                columns: Cell::new(0),
            }
        }
    }

    impl ExtinctionSource for LinearSource {
        fn ebv(&self, lon: f64, lat: f64) -> Result<f64> {
            if lat.abs() > 90.0 {
                return Err(DustMapError::InvalidCoordinate { lon, lat });
            }
            Ok(10.0 * lon + lat)
        }

        fn ebv_column(&self, lon: f64, lats: &[f64]) -> Result<Vec<f64>> {
            self.columns.set(self.columns.get() + 1);
            lats.iter().map(|&lat| self.ebv(lon, lat)).collect()
        }
    }

    #[test]
    fn test_arange_lengths() {
        assert_eq!(arange(0.0, 1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(arange(0.0, 1.0, 0.3).len(), 4);
        assert_eq!(arange(-1.0, 1.0, 0.01).len(), 200);
        assert!(arange(1.0, 1.0, 0.1).is_empty());
        assert!(arange(2.0, 1.0, 0.1).is_empty());
        assert!(arange(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn test_sample_box_shape_and_orientation() {
        let source = LinearSource::new();
        let grid = sample_box(&source, 100.0, -20.0, 0.5, 0.25).unwrap();

        assert_eq!(grid.shape(), (4, 4));
        assert_eq!(grid.ra[0], 99.5);
        assert_eq!(grid.dec[0], -20.5);

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let expected = 10.0 * grid.ra[col] + grid.dec[row];
                assert_eq!(grid.get(row, col), expected);
            }
        }
    }

    #[test]
    fn test_one_query_per_ra_value() {
        let source = LinearSource::new();
        let grid = sample_box(&source, 10.0, 10.0, 1.0, 0.1).unwrap();
        assert_eq!(source.columns.get(), grid.cols());
    }

    #[test]
    fn test_rectangular_axes_keep_shape() {
        let source = LinearSource::new();
        let grid = sample_box(&source, 45.0, 0.0, 5.0 / 60.0, 0.01).unwrap();
        let expected = arange(45.0 - 5.0 / 60.0, 45.0 + 5.0 / 60.0, 0.01).len();
        assert_eq!(grid.cols(), expected);
        assert_eq!(grid.values().len(), grid.rows() * grid.cols());
    }

    #[test]
    fn test_cells_report_offsets() {
        let source = LinearSource::new();
        let grid = sample_box(&source, 0.0, 0.0, 1.0, 1.0).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], (-1.0, -1.0, -11.0));
        assert_eq!(cells[3], (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_value_range_skips_nan() {
        let grid = FieldGrid::new(
            (0.0, 0.0),
            1.0,
            vec![0.0, 1.0],
            vec![0.0],
            vec![f64::NAN, 0.3],
        );
        assert_eq!(grid.value_range(), Some((0.3, 0.3)));
    }

    #[test]
    fn test_source_error_propagates() {
        let source = LinearSource::new();
        assert!(sample_box(&source, 0.0, 89.9, 0.5, 0.1).is_err());
    }

    #[test]
    fn test_zero_half_width_is_empty() {
        let source = LinearSource::new();
        let grid = sample_box(&source, 0.0, 0.0, 0.0, 0.1).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.shape(), (0, 0));
    }
}

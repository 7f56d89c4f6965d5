//! Summary statistics over a sampled region

use crate::sampling::FieldGrid;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// No finite value inside the aperture
    #[error("no finite map values inside the region")]
    EmptyRegion,
}

/// Which grid cells count toward the statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aperture {
    /// Every cell of the sampled square
    #[default]
    Box,
    /// Cells within the radius of the centre
    Circle,
}

impl Aperture {
    /// Parse from string value
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "circle" => Self::Circle,
            _ => Self::Box,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStats {
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Number of values the statistics were computed from
    pub count: usize,
}

impl RegionStats {
    /// Compute statistics over arbitrary values, skipping non-finite ones
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Result<Self, StatsError> {
        let mut finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(StatsError::EmptyRegion);
        }

        finite.sort_by(|a, b| a.total_cmp(b));
        let n = finite.len();
        let median = if n % 2 == 1 {
            finite[n / 2]
        } else {
            0.5 * (finite[n / 2 - 1] + finite[n / 2])
        };

        Ok(Self {
            median,
            min: finite[0],
            max: finite[n - 1],
            count: n,
        })
    }

    /// Compute statistics over a grid
    ///
    /// With `Aperture::Circle` only cells whose flat offset from the grid
    /// centre is at most `radius` degrees are used.
    pub fn from_grid(grid: &FieldGrid, aperture: Aperture, radius: f64) -> Result<Self, StatsError> {
        match aperture {
            Aperture::Box => Self::from_values(grid.values().iter().copied()),
            Aperture::Circle => Self::from_values(
                grid.cells()
                    .filter(|(dx, dy, _)| dx.hypot(*dy) <= radius)
                    .map(|(_, _, v)| v),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_odd_median() {
        let s = RegionStats::from_values([3.0, 1.0, 2.0]).unwrap();
        assert_eq!(s.median, 2.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert_eq!(s.count, 3);
    }

    #[test]
    fn test_even_median_averages_middle_pair() {
        let s = RegionStats::from_values([0.4, 0.1, 0.3, 0.2]).unwrap();
        assert!((s.median - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_values_skipped() {
        let s = RegionStats::from_values([f64::NAN, 0.5, f64::INFINITY, 0.7]).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.max, 0.7);
    }

    #[test]
    fn test_empty_region() {
        assert_eq!(
            RegionStats::from_values(Vec::new()),
            Err(StatsError::EmptyRegion)
        );
        assert_eq!(
            RegionStats::from_values([f64::NAN]),
            Err(StatsError::EmptyRegion)
        );
    }

    #[test]
    fn test_circle_aperture_excludes_corners() {
        // 3x3 grid centred on (0, 0), corners hold large values
        let grid = FieldGrid::new(
            (0.0, 0.0),
            1.5,
            vec![-1.0, 0.0, 1.0],
            vec![-1.0, 0.0, 1.0],
            vec![9.0, 1.0, 9.0, 1.0, 2.0, 1.0, 9.0, 1.0, 9.0],
        );

        let boxed = RegionStats::from_grid(&grid, Aperture::Box, 1.0).unwrap();
        assert_eq!(boxed.count, 9);
        assert_eq!(boxed.max, 9.0);

        let circle = RegionStats::from_grid(&grid, Aperture::Circle, 1.0).unwrap();
        assert_eq!(circle.count, 5);
        assert_eq!(circle.max, 2.0);
        assert_eq!(circle.median, 1.0);
    }

    #[test]
    fn test_aperture_parse() {
        assert_eq!(Aperture::parse("Circle"), Aperture::Circle);
        assert_eq!(Aperture::parse("box"), Aperture::Box);
    }

    proptest! {
        #[test]
        fn prop_median_between_min_and_max(values in prop::collection::vec(-5.0f64..5.0, 1..200)) {
            let s = RegionStats::from_values(values.clone()).unwrap();
            prop_assert!(s.min <= s.median);
            prop_assert!(s.median <= s.max);
            prop_assert_eq!(s.count, values.len());
        }

        #[test]
        fn prop_order_does_not_matter(mut values in prop::collection::vec(0.0f64..2.0, 1..50)) {
            let forward = RegionStats::from_values(values.clone()).unwrap();
            values.reverse();
            let backward = RegionStats::from_values(values).unwrap();
            prop_assert_eq!(forward, backward);
        }
    }
}

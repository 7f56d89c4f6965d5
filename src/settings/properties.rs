//! Value parsing shared by the property reader

/// Parse a boolean property value
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Plot dimension - either explicit pixels or "auto" (derived from the grid)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlotDimension {
    #[default]
    Auto,
    Pixels(u32),
}

impl PlotDimension {
    /// Parse from string property value
    ///
    /// Valid formats:
    /// - "auto" or "" (empty) → Auto
    /// - "1500" → Pixels(1500) if in valid range [100, 10000]
    pub fn from_str(value: &str, default: PlotDimension) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return PlotDimension::Auto;
        }

        match trimmed.parse::<u32>() {
            Ok(px) if (100..=10000).contains(&px) => PlotDimension::Pixels(px),
            Ok(px) => {
                log::warn!(
                    "Plot dimension {} out of valid range [100-10000], using default: {:?}",
                    px,
                    default
                );
                default
            }
            Err(_) => {
                log::warn!(
                    "Invalid plot dimension '{}', using default: {:?}",
                    trimmed,
                    default
                );
                default
            }
        }
    }

    /// Resolve to actual pixels
    ///
    /// For Auto: 5 pixels per grid cell along the axis, clamped to
    /// [400, 4000]. The default 1° box at 0.01° steps (200 cells) gives 1000px.
    pub fn resolve(&self, n_cells: usize) -> u32 {
        match self {
            PlotDimension::Pixels(px) => *px,
            PlotDimension::Auto => {
                const PIXELS_PER_CELL: usize = 5;
                const MIN_SIZE: usize = 400;
                const MAX_SIZE: usize = 4000;

                (n_cells.saturating_mul(PIXELS_PER_CELL)).clamp(MIN_SIZE, MAX_SIZE) as u32
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" No "), Some(false));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_plot_dimension_auto() {
        let dim = PlotDimension::from_str("auto", PlotDimension::Auto);
        assert_eq!(dim, PlotDimension::Auto);
        assert_eq!(dim.resolve(0), 400);
        assert_eq!(dim.resolve(17), 400);
        assert_eq!(dim.resolve(200), 1000);
        assert_eq!(dim.resolve(2000), 4000); // Capped at max
    }

    #[test]
    fn test_plot_dimension_empty_string() {
        let dim = PlotDimension::from_str("", PlotDimension::Auto);
        assert_eq!(dim, PlotDimension::Auto);
    }

    #[test]
    fn test_plot_dimension_pixels() {
        let dim = PlotDimension::from_str("1500", PlotDimension::Auto);
        assert_eq!(dim, PlotDimension::Pixels(1500));
        assert_eq!(dim.resolve(10), 1500); // Ignores grid size
    }

    #[test]
    fn test_plot_dimension_invalid() {
        let dim = PlotDimension::from_str("abc", PlotDimension::Auto);
        assert_eq!(dim, PlotDimension::Auto);
        let dim = PlotDimension::from_str("-5", PlotDimension::Pixels(800));
        assert_eq!(dim, PlotDimension::Pixels(800));
    }

    #[test]
    fn test_plot_dimension_out_of_range() {
        let dim = PlotDimension::from_str("50", PlotDimension::Auto);
        assert_eq!(dim, PlotDimension::Auto);

        let dim = PlotDimension::from_str("20000", PlotDimension::Auto);
        assert_eq!(dim, PlotDimension::Auto);
    }

    #[test]
    fn test_plot_dimension_edge_cases() {
        let dim = PlotDimension::from_str("100", PlotDimension::Auto);
        assert_eq!(dim, PlotDimension::Pixels(100));

        let dim = PlotDimension::from_str("10000", PlotDimension::Auto);
        assert_eq!(dim, PlotDimension::Pixels(10000));
    }
}

//! Query configuration from properties
//!
//! Defaults come from properties.json via the property reader; nothing here
//! hardcodes a fallback value.

use crate::dustmap::{CoordFrame, Interpolation, MapConfig};
use crate::render::fonts::FontSource;
use crate::settings::{PlotDimension, PropertyReader};
use crate::stats::Aperture;
use std::path::PathBuf;

/// Figure settings
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Render a figure per target
    pub enabled: bool,

    /// Overlay the statistics radius as a circle
    pub draw_circle: bool,

    /// Figure width (pixels or Auto)
    pub width: PlotDimension,

    /// Figure height (pixels or Auto)
    pub height: PlotDimension,

    /// Palette name from palettes.json
    pub palette: String,

    /// Font for titles and labels
    pub font: FontSource,
}

#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Map location and lookup settings
    pub map: MapConfig,

    /// Half-width of the plotted box (degrees)
    pub box_half_width: f64,

    /// Grid step (degrees)
    pub step: f64,

    /// Region used for the statistics
    pub aperture: Aperture,

    pub plot: PlotConfig,

    /// Directory receiving the figures
    pub output_dir: PathBuf,

    /// Appended to the target name in figure file names
    pub output_suffix: String,
}

impl QueryConfig {
    /// Create config from properties
    pub fn from_properties(props: &PropertyReader) -> Self {
        let map = MapConfig {
            dir: PathBuf::from(props.get_string("map.dir")),
            north: props.get_string("map.north"),
            south: props.get_string("map.south"),
            scaling: props.get_f64_in_range("map.scaling", 0.0, 10.0),
            interpolation: Interpolation::parse(&props.get_enum("map.interpolation")),
            frame: CoordFrame::parse(&props.get_enum("coord.frame")),
        };

        let box_half_width = props.get_f64_in_range("box.length", 0.0, 45.0);
        let step = props.get_f64_in_range("grid.step", 0.0, 5.0);
        let aperture = Aperture::parse(&props.get_enum("stats.aperture"));

        let plot = PlotConfig {
            enabled: props.get_bool("plot.enabled"),
            draw_circle: props.get_bool("plot.circle"),
            width: PlotDimension::from_str(&props.get_string("plot.width"), PlotDimension::Auto),
            height: PlotDimension::from_str(&props.get_string("plot.height"), PlotDimension::Auto),
            palette: props.get_enum("plot.palette"),
            font: FontSource::parse(&props.get_string("plot.font")),
        };

        Self {
            map,
            box_half_width,
            step,
            aperture,
            plot,
            output_dir: PathBuf::from(props.get_string("output.dir")),
            output_suffix: props.get_string("output.suffix"),
        }
    }

    /// Figure path for a target name
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.png", name, self.output_suffix))
    }

    /// Resolve figure size for a grid of `cols` x `rows` cells
    pub fn resolve_dimensions(&self, cols: usize, rows: usize) -> (u32, u32) {
        (self.plot.width.resolve(cols), self.plot.height.resolve(rows))
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::from_properties(&PropertyReader::default())
    }
}

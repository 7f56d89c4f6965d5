//! Heatmap figure of a sampled field
//!
//! Layout follows the usual sky-image convention: offsets from the target in
//! degrees with RA increasing to the left, origin at the bottom. The field is
//! stretched over the extent `(-L, L, -L, L)` where L is the box half-width.
//! Charts are drawn in display coordinates where `x = -ΔRA`.

use super::fonts::FONT_FAMILY;
use super::palettes::PaletteDefinition;
use super::RenderError;
use crate::sampling::FieldGrid;
use crate::stats::RegionStats;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Vertices used to approximate the radius circle
const CIRCLE_SEGMENTS: usize = 180;

/// Dots per grid line
const GRID_DOTS: usize = 60;

/// Colour bar gradient resolution
const COLORBAR_STEPS: usize = 128;

/// Cells without a finite value
const MISSING_COLOR: RGBColor = RGBColor(200, 200, 200);

/// Everything needed to draw one figure
pub struct FigureSpec<'a> {
    pub field: &'a FieldGrid,
    pub stats: &'a RegionStats,
    /// Statistics radius in degrees (drawn as the overlay circle)
    pub radius_deg: f64,
    pub draw_circle: bool,
    pub palette: &'a PaletteDefinition,
    pub width: u32,
    pub height: u32,
    /// Draw title, axis labels and colour bar ticks
    pub text: bool,
}

impl FigureSpec<'_> {
    /// Title line, same numbers as the stdout summary
    pub fn title(&self) -> String {
        format!(
            "median={:.3}, min={:.3}, max={:.3}",
            self.stats.median, self.stats.min, self.stats.max
        )
    }
}

fn drawing_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Render the figure to a PNG file
pub fn render_png(spec: &FigureSpec, path: &Path) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    draw_figure(&root, spec)?;
    root.present().map_err(drawing_err)?;
    Ok(())
}

/// Draw the figure on any backend
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &FigureSpec,
) -> Result<(), RenderError> {
    let field = spec.field;
    let (rows, cols) = field.shape();
    if rows == 0 || cols == 0 {
        return Err(RenderError::EmptyField(format!("{}x{} grid", rows, cols)));
    }
    let (vmin, vmax) = field
        .value_range()
        .ok_or_else(|| RenderError::EmptyField("no finite values".to_string()))?;

    root.fill(&WHITE).map_err(drawing_err)?;

    let colorbar_width = ((spec.width as f64) * 0.12).max(60.0) as u32;
    let (main, colorbar) = root.split_horizontally(spec.width.saturating_sub(colorbar_width));

    draw_heatmap(&main, spec, vmin, vmax)?;
    draw_colorbar(&colorbar, spec, vmin, vmax)?;
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &FigureSpec,
    vmin: f64,
    vmax: f64,
) -> Result<(), RenderError> {
    let field = spec.field;
    let (rows, cols) = field.shape();
    let l = field.half_width;
    let title = spec.title();

    let mut builder = ChartBuilder::on(area);
    builder.margin(10);
    if spec.text {
        builder
            .caption(&title, (FONT_FAMILY, 20))
            .x_label_area_size(40)
            .y_label_area_size(60);
    }
    let mut chart = builder
        .build_cartesian_2d(-l..l, -l..l)
        .map_err(drawing_err)?;

    let dx = 2.0 * l / cols as f64;
    let dy = 2.0 * l / rows as f64;
    let palette = spec.palette;

    chart
        .draw_series((0..rows).flat_map(|row| {
            (0..cols).map(move |col| {
                let value = field.get(row, col);
                let color = if value.is_finite() {
                    let [r, g, b] = palette.map_value(value, vmin, vmax);
                    RGBColor(r, g, b)
                } else {
                    MISSING_COLOR
                };
                // RA offset grows to the left
                let x0 = l - col as f64 * dx;
                let x1 = l - (col + 1) as f64 * dx;
                let y0 = -l + row as f64 * dy;
                let y1 = -l + (row + 1) as f64 * dy;
                Rectangle::new([(x1, y0), (x0, y1)], color.filled())
            })
        }))
        .map_err(drawing_err)?;

    // Dotted grid at -L, 0, L
    let dot_style = BLACK.mix(0.7).stroke_width(1);
    for &p in &[-l, 0.0, l] {
        chart
            .draw_series(dotted_line((p, -l), (p, l)).map(|seg| PathElement::new(seg, dot_style)))
            .map_err(drawing_err)?;
        chart
            .draw_series(dotted_line((-l, p), (l, p)).map(|seg| PathElement::new(seg, dot_style)))
            .map_err(drawing_err)?;
    }

    chart
        .draw_series(std::iter::once(Cross::new(
            (0.0, 0.0),
            8,
            RED.stroke_width(2),
        )))
        .map_err(drawing_err)?;

    if spec.draw_circle && spec.radius_deg > 0.0 {
        let r = spec.radius_deg;
        let points: Vec<(f64, f64)> = (0..=CIRCLE_SEGMENTS)
            .map(|i| {
                let t = i as f64 / CIRCLE_SEGMENTS as f64 * std::f64::consts::TAU;
                (r * t.cos(), r * t.sin())
            })
            .collect();
        chart
            .draw_series(std::iter::once(PathElement::new(points, RED.stroke_width(2))))
            .map_err(drawing_err)?;
    }

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(-l, -l), (l, l)],
            BLACK.stroke_width(1),
        )))
        .map_err(drawing_err)?;

    if spec.text {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(3)
            .y_labels(3)
            .x_label_formatter(&|v| tick_label(-v, 2))
            .y_label_formatter(&|v| tick_label(*v, 2))
            .x_desc("Δα* (deg)")
            .y_desc("Δδ* (deg)")
            .label_style((FONT_FAMILY, 14))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()
            .map_err(drawing_err)?;
    }

    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &FigureSpec,
    vmin: f64,
    vmax: f64,
) -> Result<(), RenderError> {
    // Constant fields still get a visible bar
    let (lo, hi) = if vmax > vmin {
        (vmin, vmax)
    } else {
        (vmin - 1e-3, vmax + 1e-3)
    };

    let mut builder = ChartBuilder::on(area);
    if spec.text {
        builder
            .margin_top(40)
            .margin_bottom(50)
            .margin_right(10)
            .y_label_area_size(55);
    } else {
        builder.margin(10);
    }
    let mut chart = builder
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(drawing_err)?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    let palette = spec.palette;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|k| {
            let v0 = lo + k as f64 * step;
            let v1 = v0 + step;
            let [r, g, b] = palette.map_value(0.5 * (v0 + v1), vmin, vmax);
            Rectangle::new([(0.0, v0), (1.0, v1)], RGBColor(r, g, b).filled())
        }))
        .map_err(drawing_err)?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(0.0, lo), (1.0, hi)],
            BLACK.stroke_width(1),
        )))
        .map_err(drawing_err)?;

    if spec.text {
        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(5)
            .y_label_formatter(&|v| tick_label(*v, 3))
            .y_desc("E(B-V)")
            .label_style((FONT_FAMILY, 12))
            .axis_desc_style((FONT_FAMILY, 14))
            .draw()
            .map_err(drawing_err)?;
    }

    Ok(())
}

/// Fixed-point tick label; values that round to zero print without a sign
fn tick_label(value: f64, decimals: usize) -> String {
    let label = format!("{:.*}", decimals, value);
    match label.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => label,
    }
}

/// Split a segment into alternating drawn pieces
fn dotted_line(from: (f64, f64), to: (f64, f64)) -> impl Iterator<Item = Vec<(f64, f64)>> {
    let n = GRID_DOTS * 2;
    (0..n).step_by(2).map(move |i| {
        let t0 = i as f64 / n as f64;
        let t1 = (i + 1) as f64 / n as f64;
        let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
        vec![lerp(t0), lerp(t1)]
    })
}

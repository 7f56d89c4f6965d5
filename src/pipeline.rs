//! Per-target query and figure pipeline
//!
//! For every target, in order:
//! 1. Samples the statistics region (half-width = target radius)
//! 2. Writes the median/min/max summary line
//! 3. Samples the plot box and renders the figure
//!
//! The first failure stops the run.

use crate::config::QueryConfig;
use crate::dustmap::ExtinctionSource;
use crate::render::{fonts, render_png, FigureSpec, PaletteDefinition, RenderError, PALETTE_REGISTRY};
use crate::sampling::sample_box;
use crate::stats::RegionStats;
use crate::targets::Target;
use anyhow::Context;
use std::io::Write;
use std::path::PathBuf;

/// Error type for pipeline operations
pub type PipelineError = anyhow::Error;

/// A rendered figure on disk
#[derive(Debug, Clone, PartialEq)]
pub struct PlotResult {
    pub label: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Outcome for one target
#[derive(Debug, Clone)]
pub struct TargetResult {
    pub target: Target,
    pub stats: RegionStats,
    /// None when plotting is disabled
    pub plot: Option<PlotResult>,
}

/// One summary line per target
pub fn summary_line(name: &str, stats: &RegionStats) -> String {
    format!(
        "{}: median={:.3}, min={:.3}, max={:.3}",
        name, stats.median, stats.min, stats.max
    )
}

/// Shared figure settings resolved once per run
struct FigureContext<'a> {
    palette: &'a PaletteDefinition,
    text: bool,
}

/// Run every target, writing summary lines to `out`
pub fn process_targets<S: ExtinctionSource + ?Sized>(
    source: &S,
    config: &QueryConfig,
    targets: &[Target],
    out: &mut dyn Write,
) -> Result<Vec<TargetResult>, PipelineError> {
    print_config_info(config, targets.len());

    let figure_ctx = if config.plot.enabled {
        let palette = PALETTE_REGISTRY
            .get_or_default(&config.plot.palette)
            .ok_or_else(|| RenderError::UnknownPalette(config.plot.palette.clone()))?;
        let text = fonts::enable_text(&config.plot.font);

        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output_dir.display()
            )
        })?;

        Some(FigureContext { palette, text })
    } else {
        log::info!("Plotting disabled, computing statistics only");
        None
    };

    let mut results = Vec::with_capacity(targets.len());
    for (idx, target) in targets.iter().enumerate() {
        log::info!(
            "[{}/{}] {} (ra={}, dec={}, radius={}')",
            idx + 1,
            targets.len(),
            target.name,
            target.ra,
            target.dec,
            target.radius_arcmin
        );

        let result = process_target(source, config, target, figure_ctx.as_ref(), out)
            .with_context(|| format!("Processing target '{}' failed", target.name))?;
        results.push(result);
    }

    log::info!("Processed {} target(s)", results.len());
    Ok(results)
}

fn process_target<S: ExtinctionSource + ?Sized>(
    source: &S,
    config: &QueryConfig,
    target: &Target,
    figure_ctx: Option<&FigureContext>,
    out: &mut dyn Write,
) -> Result<TargetResult, PipelineError> {
    let radius = target.radius_deg();

    let region = sample_box(source, target.ra, target.dec, radius, config.step)?;
    let stats = RegionStats::from_grid(&region, config.aperture, radius)?;
    log::debug!(
        "  Statistics from {} of {} cells ({:?} aperture)",
        stats.count,
        region.values().len(),
        config.aperture
    );

    writeln!(out, "{}", summary_line(&target.name, &stats))?;

    let plot = match figure_ctx {
        Some(ctx) => Some(render_target(source, config, target, &stats, ctx)?),
        None => None,
    };

    Ok(TargetResult {
        target: target.clone(),
        stats,
        plot,
    })
}

fn render_target<S: ExtinctionSource + ?Sized>(
    source: &S,
    config: &QueryConfig,
    target: &Target,
    stats: &RegionStats,
    ctx: &FigureContext,
) -> Result<PlotResult, PipelineError> {
    let field = sample_box(
        source,
        target.ra,
        target.dec,
        config.box_half_width,
        config.step,
    )?;
    let (width, height) = config.resolve_dimensions(field.cols(), field.rows());

    let spec = FigureSpec {
        field: &field,
        stats,
        radius_deg: target.radius_deg(),
        draw_circle: config.plot.draw_circle,
        palette: ctx.palette,
        width,
        height,
        text: ctx.text,
    };

    let path = config.output_path(&target.name);
    render_png(&spec, &path)?;
    log::info!(
        "  Saved {} ({}x{} px, {}x{} grid)",
        path.display(),
        width,
        height,
        field.rows(),
        field.cols()
    );

    Ok(PlotResult {
        label: target.name.clone(),
        path,
        width,
        height,
    })
}

fn print_config_info(config: &QueryConfig, n_targets: usize) {
    log::info!("Configuration:");
    log::info!("  Targets: {}", n_targets);
    log::info!("  Box half-width: {} deg", config.box_half_width);
    log::info!("  Grid step: {} deg", config.step);
    log::info!("  Aperture: {:?}", config.aperture);
    if config.plot.enabled {
        log::info!(
            "  Plot: {:?} x {:?}, palette {}, circle {}",
            config.plot.width,
            config.plot.height,
            config.plot.palette,
            config.plot.draw_circle
        );
        log::info!("  Output: {}", config.output_dir.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dustmap::{DustMapError, Result as MapResult};
    use crate::settings::reader_from_json;

    /// Smooth synthetic field: value rises with distance from (120, -30)
    struct BowlSource;

    impl ExtinctionSource for BowlSource {
        fn ebv(&self, lon: f64, lat: f64) -> MapResult<f64> {
            if lat.abs() > 90.0 {
                return Err(DustMapError::InvalidCoordinate { lon, lat });
            }
            Ok(0.1 + (lon - 120.0).powi(2) + (lat + 30.0).powi(2))
        }
    }

    fn config_in(dir: &std::path::Path, extra: &str) -> QueryConfig {
        let json = format!(
            r#"{{"output.dir": "{}", "box.length": 0.2, "grid.step": 0.02{}}}"#,
            dir.display(),
            extra
        );
        QueryConfig::from_properties(&reader_from_json(&json).unwrap())
    }

    fn targets() -> Vec<Target> {
        vec![
            Target::new("Centre", 120.0, -30.0, 6.0),
            Target::new("Offset", 121.0, -29.0, 3.0),
        ]
    }

    #[test]
    fn test_summary_line_format() {
        let stats = RegionStats {
            median: 0.12345,
            min: 0.1,
            max: 0.2,
            count: 4,
        };
        assert_eq!(
            summary_line("Haffner 14", &stats),
            "Haffner 14: median=0.123, min=0.100, max=0.200"
        );
    }

    #[test]
    fn test_process_targets_writes_summaries_and_figures() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let config = config_in(&out_dir, "");
        let mut out = Vec::new();

        let results = process_targets(&BowlSource, &config, &targets(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Centre: median="));
        assert!(lines[1].starts_with("Offset: median="));

        assert_eq!(results.len(), 2);
        for result in &results {
            let stats = result.stats;
            assert!(stats.min <= stats.median && stats.median <= stats.max);

            let plot = result.plot.as_ref().unwrap();
            assert_eq!(plot.path, out_dir.join(format!("{}_SFD.png", result.target.name)));
            assert!(plot.path.exists());
            // ~20 cells per axis; auto size clamps to 400
            assert_eq!((plot.width, plot.height), (400, 400));
        }

        // The bowl is lowest at its centre
        assert!(results[0].stats.min < results[1].stats.min);
    }

    #[test]
    fn test_stats_only_run() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("never_created");
        let config = config_in(&out_dir, r#", "plot.enabled": false"#);
        let mut out = Vec::new();

        let results = process_targets(&BowlSource, &config, &targets(), &mut out).unwrap();
        assert!(results.iter().all(|r| r.plot.is_none()));
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_circle_aperture_tightens_range() {
        let dir = tempfile::tempdir().unwrap();
        let boxed = config_in(dir.path(), r#", "plot.enabled": false"#);
        let circle = config_in(
            dir.path(),
            r#", "plot.enabled": false, "stats.aperture": "circle""#,
        );
        let target = [Target::new("Centre", 120.0, -30.0, 6.0)];

        let a = process_targets(&BowlSource, &boxed, &target, &mut Vec::new()).unwrap();
        let b = process_targets(&BowlSource, &circle, &target, &mut Vec::new()).unwrap();
        assert!(b[0].stats.count < a[0].stats.count);
        assert!(b[0].stats.max <= a[0].stats.max);
    }

    #[test]
    fn test_first_failure_stops_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), r#", "plot.enabled": false"#);
        let targets = vec![
            Target::new("Pole", 0.0, 89.95, 5.0),
            Target::new("Never", 120.0, -30.0, 5.0),
        ];
        let mut out = Vec::new();

        let err = process_targets(&BowlSource, &config, &targets, &mut out).unwrap_err();
        assert!(err.to_string().contains("Pole"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_results_are_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), r#", "plot.enabled": false"#);
        let first = process_targets(&BowlSource, &config, &targets(), &mut Vec::new()).unwrap();
        let second = process_targets(&BowlSource, &config, &targets(), &mut Vec::new()).unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.stats, b.stats);
        }
    }
}

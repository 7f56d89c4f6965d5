//! Single-position E(B-V) lookup
//!
//! Prints one line per `--ra`/`--dec` pair. Coordinates are interpreted in the
//! configured frame (`coord.frame`, ICRS by default).
//!
//! Usage:
//! ```bash
//! point_query --ra 116.2125 --dec -28.3667 [--ra ... --dec ...] \
//!             [--config props.json] [--map-dir sfddata-master]
//! ```

use anyhow::{bail, Context};
use sfd_dust_query::config::QueryConfig;
use sfd_dust_query::dustmap::{ExtinctionSource, SfdMap};
use sfd_dust_query::logging::setup_logging;
use sfd_dust_query::settings::load_reader;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct PointArgs {
    config: Option<PathBuf>,
    map_dir: Option<String>,
    ras: Vec<f64>,
    decs: Vec<f64>,
}

fn main() {
    // Quieter default: the output is the values themselves
    let _logger = setup_logging("warn").ok();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = parse_args(&args).and_then(|a| run(&a)) {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> anyhow::Result<PointArgs> {
    let mut parsed = PointArgs::default();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .with_context(|| format!("Missing value for '{}'", flag))?;
        match flag {
            "--ra" => parsed.ras.push(parse_degrees(flag, value)?),
            "--dec" => parsed.decs.push(parse_degrees(flag, value)?),
            "--config" => parsed.config = Some(PathBuf::from(value)),
            "--map-dir" => parsed.map_dir = Some(value.clone()),
            _ => bail!("Unknown argument '{}'", flag),
        }
        i += 2;
    }

    if parsed.ras.is_empty() {
        bail!("At least one --ra/--dec pair is required");
    }
    if parsed.ras.len() != parsed.decs.len() {
        bail!(
            "Got {} --ra value(s) but {} --dec value(s)",
            parsed.ras.len(),
            parsed.decs.len()
        );
    }
    Ok(parsed)
}

fn parse_degrees(flag: &str, value: &str) -> anyhow::Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid number '{}' for {}", value, flag))
}

fn run(args: &PointArgs) -> anyhow::Result<()> {
    let mut props = load_reader(args.config.as_deref())?;
    if let Some(dir) = &args.map_dir {
        props.set("map.dir", dir.as_str());
    }
    let config = QueryConfig::from_properties(&props);
    let map = SfdMap::open(&config.map)
        .with_context(|| format!("Failed to load dust maps from {}", config.map.dir.display()))?;

    for (&ra, &dec) in args.ras.iter().zip(&args.decs) {
        let ebv = map.ebv(ra, dec)?;
        println!("{} {} {:.4}", ra, dec, ebv);
    }
    Ok(())
}

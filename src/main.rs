//! SFD dust query - main entry point
//!
//! Loads both SFD98 hemispheres, then for every target prints the E(B-V)
//! median/min/max of its region and saves a heatmap figure.
//!
//! Usage:
//! ```bash
//! sfd_dust_query [--config props.json] [--targets targets.json] \
//!                [--map-dir sfddata-master] [--out out]
//! ```

use anyhow::{bail, Context};
use sfd_dust_query::config::QueryConfig;
use sfd_dust_query::dustmap::SfdMap;
use sfd_dust_query::logging::{setup_logging, DEFAULT_LEVEL};
use sfd_dust_query::pipeline;
use sfd_dust_query::settings::load_reader;
use sfd_dust_query::targets::load_targets;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    targets: Option<PathBuf>,
    map_dir: Option<String>,
    out_dir: Option<String>,
}

fn main() {
    let _logger = match setup_logging(DEFAULT_LEVEL) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logger initialization failed: {}", e);
            None
        }
    };

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = parse_args(&args).and_then(|cli| run(&cli)) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Parse command-line arguments; every flag takes exactly one value
fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .with_context(|| format!("Missing value for '{}'", flag))?;
        match flag {
            "--config" => cli.config = Some(PathBuf::from(value)),
            "--targets" => cli.targets = Some(PathBuf::from(value)),
            "--map-dir" => cli.map_dir = Some(value.clone()),
            "--out" => cli.out_dir = Some(value.clone()),
            _ => bail!("Unknown argument '{}'", flag),
        }
        i += 2;
    }
    Ok(cli)
}

fn run(cli: &CliArgs) -> anyhow::Result<()> {
    log::info!("SFD dust query v{}", env!("CARGO_PKG_VERSION"));

    let mut props = load_reader(cli.config.as_deref())?;
    if let Some(dir) = &cli.map_dir {
        props.set("map.dir", dir.as_str());
    }
    if let Some(dir) = &cli.out_dir {
        props.set("output.dir", dir.as_str());
    }
    let config = QueryConfig::from_properties(&props);

    let targets = load_targets(cli.targets.as_deref())?;
    let map = SfdMap::open(&config.map)
        .with_context(|| format!("Failed to load dust maps from {}", config.map.dir.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline::process_targets(&map, &config, &targets, &mut out)?;

    log::info!("Done");
    Ok(())
}

//! Logger setup
//!
//! Records go to stderr so stdout carries only the per-target summary lines.
//! `RUST_LOG` overrides the base level.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Level used when neither `RUST_LOG` nor a caller override is set
pub const DEFAULT_LEVEL: &str = "info";

/// Start the global logger
///
/// Keep the returned handle alive for the lifetime of the process.
pub fn setup_logging(base_level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(base_level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}

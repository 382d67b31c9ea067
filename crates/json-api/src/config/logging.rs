//! Logging Config

use clap::Args;

/// Logging output settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,
}

//! Log subscriber setup for the `huekit` binary.

use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{CliError, Result};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "HUEKIT_LOG";
/// Filter used when [`LOG_ENV`] is unset or unparsable.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global subscriber, writing to stderr.
pub fn init_logging(json: bool) -> Result<()> {
    let builder = fmt::fmt()
        .with_env_filter(build_env_filter())
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    installed.map_err(|err| CliError::Logging(err.to_string()))
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

//! Tracing subscriber setup for the `leadboard` binary.
//!
//! Events go to stderr so command output on stdout stays clean. `RUST_LOG`
//! wins over the configured level when it is set.

use anyhow::{Result, anyhow};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Build the filter: `RUST_LOG` if set, else `default_directive`.
pub fn env_filter(default_directive: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| anyhow!("Invalid log filter '{}': {}", default_directive, e)),
    }
}

/// Level used when the configured directive does not parse.
pub const FALLBACK_DIRECTIVE: &str = "warn";

/// Install the global subscriber. Call once, before any board work.
///
/// An invalid directive does not stop the binary: the subscriber falls back
/// to [`FALLBACK_DIRECTIVE`] and logs a warning, leaving `config validate`
/// to report the bad setting.
pub fn init(default_directive: &str, format: LogFormat) -> Result<()> {
    let (filter, rejected) = match env_filter(default_directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(FALLBACK_DIRECTIVE), Some(e)),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    if let Some(e) = rejected {
        warn!(error = %e, fallback = FALLBACK_DIRECTIVE, "Ignoring invalid log filter");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_is_used_or_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(env_filter("leadboard=debug").is_ok());
        assert!(env_filter("leadboard=loud").is_err());
    }

    #[test]
    fn test_fallback_directive_parses() {
        assert!(EnvFilter::try_new(FALLBACK_DIRECTIVE).is_ok());
    }
}

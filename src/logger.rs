//! Logging initialisation via tracing-subscriber.
//!
//! Logs go to stderr so they never land on the typed hero line. Call
//! [`init`] once, after the effective level is resolved.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Initialise the global tracing subscriber.
///
/// `level` accepts a level (`"warn"`, `"debug"`…) or a full filter directive
/// (`"typefolio=debug,reqwest=warn"`).
///
/// With `prefer_level` (a `-v` flag was given) `level` wins and `RUST_LOG` is
/// only a fallback for an invalid `level`. Otherwise `RUST_LOG` wins and
/// `level` is the fallback.
pub fn init(level: &str, prefer_level: bool) -> Result<(), AppError> {
    let filter = if prefer_level {
        EnvFilter::try_new(level).or_else(|level_err| {
            EnvFilter::try_from_default_env().map_err(|env_err| {
                AppError::Logger(format!(
                    "invalid log level '{level}': {level_err}; RUST_LOG parse failed: {env_err}"
                ))
            })
        })?
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(())
}

/// Map `-v` repetitions to a level. Zero means "use the configured level".
///
///   -v → warn, -vv → info, -vvv → debug, -vvvv+ → trace
pub fn verbosity_level(count: u8) -> Option<&'static str> {
    match count {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    }
}

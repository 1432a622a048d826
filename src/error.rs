//! Application-wide error types.

use thiserror::Error;

use crate::relay::RelayError;
use crate::typewriter::TypewriterError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TypewriterError> for AppError {
    fn from(e: TypewriterError) -> Self {
        AppError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().contains("config error"));
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn logger_error_display() {
        let e = AppError::Logger("already initialized".into());
        assert!(e.to_string().contains("already initialized"));
    }

    #[test]
    fn typewriter_error_is_a_config_error() {
        let e: AppError = TypewriterError::EmptyPhrases.into();
        assert!(matches!(e, AppError::Config(_)));
        assert!(e.to_string().contains("phrase"));
    }

    #[test]
    fn relay_error_converts() {
        let e: AppError = RelayError::Request("connection refused".into()).into();
        assert!(e.to_string().contains("relay error"));
        assert!(e.to_string().contains("connection refused"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }
}

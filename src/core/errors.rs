use std::result::Result as StdResult;

use fleet_config::ConfigError;
use fleet_core::CoreError;
use thiserror::Error;

/// Unified error type for the service, storage and configuration layers.
#[derive(Error, Debug)]
pub enum FleetError {
    #[error("{0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Corrupted data: {0}")]
    CorruptedSnapshot(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FleetError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FleetError::Validation(_))
    }
}

pub type Result<T> = StdResult<T, FleetError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FleetError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for FleetError {
    fn from(err: std::io::Error) -> Self {
        FleetError::StorageError(err.to_string())
    }
}

impl From<CoreError> for FleetError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => FleetError::Validation(message),
            CoreError::Storage(message) => FleetError::StorageError(message),
            CoreError::Serde(message) => FleetError::CorruptedSnapshot(message),
            CoreError::Io(err) => FleetError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for FleetError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => FleetError::StorageError(io.to_string()),
            ConfigError::Serde(message) | ConfigError::Invalid(message) => {
                FleetError::ConfigError(message)
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(FleetError::from(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(FleetError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_pass_through_untouched() {
        let err = FleetError::from(CoreError::Validation("amount `x` is invalid".into()));
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "amount `x` is invalid");
    }

    #[test]
    fn serde_failures_surface_as_corruption() {
        let err = FleetError::from(CoreError::Serde("snapshot `currentMileage` is bad".into()));
        assert!(matches!(err, FleetError::CorruptedSnapshot(_)));
        assert!(err.to_string().contains("currentMileage"));
    }

    #[test]
    fn config_errors_wrap_into_cli_errors() {
        let err = CliError::from(ConfigError::Invalid("unknown setting `theme`".into()));
        assert!(matches!(err, CliError::Core(FleetError::ConfigError(_))));
    }
}

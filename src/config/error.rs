use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or parsed
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    /// Two configuration sources were combined in an unsupported way
    #[error("Conflicting configuration sources: {message}")]
    MutualExclusivity { message: String },

    /// A loaded value failed semantic validation
    #[error("Invalid configuration for {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl ConfigError {
    pub fn mutual_exclusivity(message: impl Into<String>) -> Self {
        ConfigError::MutualExclusivity {
            message: message.into(),
        }
    }
}

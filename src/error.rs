//! Error types for s4-signal-monitor.

use std::fmt;

/// Result type alias for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Errors that can occur when building or running a monitor.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The monitor configuration was rejected.
    #[error("Invalid monitor configuration: {0}")]
    InvalidConfig(String),

    /// The background monitor task panicked or was aborted.
    #[error("Monitor task failed: {0}")]
    TaskFailed(String),
}

/// Reasons a single control read produced no value.
///
/// Callers of [`ControlSource::read`](crate::sources::ControlSource::read) only
/// ever see an absent value; these variants exist for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The control utility could not be started.
    #[error("failed to launch {utility}: {source}")]
    Launch {
        /// Program that was invoked
        utility: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The control utility exited unsuccessfully.
    #[error("control utility exited with {0}")]
    ExitStatus(std::process::ExitStatus),

    /// The read did not finish within the configured timeout.
    #[error("control read timed out")]
    TimedOut,

    /// The utility wrote something that is not UTF-8.
    #[error("control output is not valid UTF-8")]
    NotUtf8,

    /// The value after the final colon is not an integer.
    #[error("malformed control output {output:?}")]
    Malformed {
        /// The trimmed output that failed to parse
        output: String,
    },
}

/// Validation error for monitor settings and signal acceptance hooks.
#[derive(Debug)]
pub enum ValidationError {
    /// Custom validation error with a message.
    Custom(String),

    /// A specific field has an invalid value.
    InvalidField {
        /// The field name/path
        field: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Collapse a list of errors: `None` when empty, the sole error when there
    /// is one, `Multiple` otherwise.
    pub fn from_list(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::InvalidField { field, reason } => {
                write!(f, "Field '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for MonitorError {
    fn from(err: ValidationError) -> Self {
        MonitorError::InvalidConfig(err.to_string())
    }
}

//! Validation support for monitor settings.

use crate::error::ValidationError;

/// Trait for checking settings before a monitor is built.
///
/// # Examples
///
/// ```rust
/// use s4_signal_monitor::core::{MonitorConfig, Validate};
/// use std::time::Duration;
///
/// let config = MonitorConfig {
///     poll_interval: Duration::ZERO,
///     ..Default::default()
/// };
/// assert!(config.validate().is_err());
/// ```
pub trait Validate {
    /// Validate the value.
    ///
    /// # Errors
    ///
    /// Should return a `ValidationError` describing what validation failed.
    fn validate(&self) -> Result<(), ValidationError>;
}

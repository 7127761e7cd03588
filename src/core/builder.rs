//! Builder for constructing SignalMonitor instances.

use crate::core::detector::ModeValidator;
use crate::core::{ChangeDetector, MonitorConfig, SignalMode, SignalMonitor, Validate};
use crate::error::{Result, ValidationError};
use crate::sources::{ControlSource, V4l2CtlSource};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Builder for a [`SignalMonitor`].
///
/// Starts from [`MonitorConfig::default`]. Unless a custom source is supplied,
/// the monitor reads controls through [`V4l2CtlSource`] using the configured
/// device, utility and read timeout.
///
/// # Examples
///
/// ```rust,no_run
/// use s4_signal_monitor::prelude::*;
/// use std::time::Duration;
///
/// # fn example() -> Result<()> {
/// let monitor = SignalMonitor::builder()
///     .with_device("/dev/video2")
///     .with_poll_interval(Duration::from_millis(500))
///     .with_validation(|mode: &SignalMode| {
///         if mode.resolution.width <= 0 {
///             return Err(ValidationError::invalid_field("width", "no signal"));
///         }
///         Ok(())
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SignalMonitorBuilder {
    config: MonitorConfig,
    source: Option<Box<dyn ControlSource>>,
    validator: Option<ModeValidator>,
}

impl SignalMonitorBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: MonitorConfig::default(),
            source: None,
            validator: None,
        }
    }

    /// Replace all settings at once.
    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// Device node to query.
    pub fn with_device(mut self, device: impl Into<PathBuf>) -> Self {
        self.config.device = device.into();
        self
    }

    /// Control utility to invoke.
    pub fn with_utility(mut self, utility: impl Into<PathBuf>) -> Self {
        self.config.utility = utility.into();
        self
    }

    /// Time slept between cycles.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Bound each control read.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    /// Print report lines to stdout (on by default).
    pub fn with_console_output(mut self, enabled: bool) -> Self {
        self.config.console_output = enabled;
        self
    }

    /// Read controls from a custom source instead of the control utility.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use s4_signal_monitor::prelude::*;
    /// use s4_signal_monitor::sources::ScriptedSource;
    ///
    /// let source = ScriptedSource::new(ControlNames::default());
    /// let monitor = SignalMonitor::builder()
    ///     .with_source(source)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn with_source<S: ControlSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Only report modes accepted by `validator`.
    ///
    /// A refused mode is handled like a partial read: nothing is reported and
    /// the last known mode is kept.
    pub fn with_validation<F>(mut self, validator: F) -> Self
    where
        F: Fn(&SignalMode) -> std::result::Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Build the monitor.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidConfig`](crate::error::MonitorError::InvalidConfig)
    /// if the settings fail validation.
    pub fn build(self) -> Result<SignalMonitor> {
        self.config.validate()?;

        let source = match self.source {
            Some(source) => source,
            None => Box::new(
                V4l2CtlSource::new(self.config.device.clone())
                    .with_utility(self.config.utility.clone())
                    .with_timeout(self.config.read_timeout),
            ),
        };
        let detector = ChangeDetector::new().with_validator(self.validator);

        Ok(SignalMonitor::from_parts(self.config, source, detector))
    }
}

impl Default for SignalMonitorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalMonitor {
    /// Create a new builder for constructing a monitor.
    pub fn builder() -> SignalMonitorBuilder {
        SignalMonitorBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ControlNames, Sample};
    use crate::error::MonitorError;
    use crate::sources::ScriptedSource;

    #[test]
    fn test_builder_defaults() {
        let monitor = SignalMonitorBuilder::new().build().unwrap();
        assert_eq!(monitor.config(), &MonitorConfig::default());
        assert!(format!("{:?}", monitor).contains("v4l2-ctl:/dev/s4-video"));
    }

    #[test]
    fn test_builder_overrides() {
        let builder = SignalMonitorBuilder::new()
            .with_device("/dev/video7")
            .with_utility("/usr/local/bin/v4l2-ctl")
            .with_poll_interval(Duration::from_millis(250))
            .with_read_timeout(Duration::from_secs(1))
            .with_console_output(false);

        assert_eq!(builder.config.device, PathBuf::from("/dev/video7"));
        assert_eq!(builder.config.utility, PathBuf::from("/usr/local/bin/v4l2-ctl"));
        assert_eq!(builder.config.poll_interval, Duration::from_millis(250));
        assert_eq!(builder.config.read_timeout, Some(Duration::from_secs(1)));
        assert!(!builder.config.console_output);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = SignalMonitorBuilder::new()
            .with_poll_interval(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(MonitorError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_validation_hook_applies() {
        let source = ScriptedSource::new(ControlNames::default());
        source.push_sample(Sample::new(0, 0, 0));
        source.push_sample(Sample::new(640, 480, 60));

        let mut monitor = SignalMonitorBuilder::new()
            .with_console_output(false)
            .with_source(source)
            .with_validation(|mode: &SignalMode| {
                if mode.frame_rate <= 0 {
                    return Err(ValidationError::invalid_field("frame_rate", "must be positive"));
                }
                Ok(())
            })
            .build()
            .unwrap();

        assert!(monitor.poll_once().await.is_none());
        let change = monitor.poll_once().await.unwrap();
        assert_eq!(change.previous, None);
        assert_eq!(change.current.to_string(), "640x480 @ 60fps");
    }
}

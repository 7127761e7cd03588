//! Monitor settings.

use crate::core::Validate;
use crate::error::ValidationError;
use crate::sources::{DEFAULT_DEVICE, DEFAULT_UTILITY};
use std::path::PathBuf;
use std::time::Duration;

/// Default time between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Names of the three controls read every cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlNames {
    /// Control holding the active width
    pub horizontal_resolution: String,
    /// Control holding the active height
    pub vertical_resolution: String,
    /// Control holding the estimated frame rate
    pub frame_rate: String,
}

impl Default for ControlNames {
    fn default() -> Self {
        Self {
            horizontal_resolution: "s4_horizontal_resolution".to_string(),
            vertical_resolution: "s4_vertical_resolution".to_string(),
            frame_rate: "s4_estimated_framerate".to_string(),
        }
    }
}

/// Settings for a [`SignalMonitor`](crate::core::SignalMonitor).
///
/// The defaults describe the S4 capture card: `/dev/s4-video` queried through
/// `v4l2-ctl` every two seconds, with report lines printed to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Device node handed to the control utility
    pub device: PathBuf,
    /// Control utility program
    pub utility: PathBuf,
    /// Controls read every cycle
    pub controls: ControlNames,
    /// Sleep between the end of one cycle and the start of the next
    pub poll_interval: Duration,
    /// Upper bound for a single control read; `None` waits forever
    pub read_timeout: Option<Duration>,
    /// Print report lines to stdout
    pub console_output: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            utility: PathBuf::from(DEFAULT_UTILITY),
            controls: ControlNames::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            read_timeout: None,
            console_output: true,
        }
    }
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.poll_interval.is_zero() {
            errors.push(ValidationError::invalid_field(
                "poll_interval",
                "must be greater than zero",
            ));
        }
        if self.device.as_os_str().is_empty() {
            errors.push(ValidationError::invalid_field("device", "must not be empty"));
        }
        if self.utility.as_os_str().is_empty() {
            errors.push(ValidationError::invalid_field("utility", "must not be empty"));
        }
        if self.read_timeout.is_some_and(|t| t.is_zero()) {
            errors.push(ValidationError::invalid_field(
                "read_timeout",
                "must be greater than zero when set",
            ));
        }

        let names = [
            ("controls.horizontal_resolution", &self.controls.horizontal_resolution),
            ("controls.vertical_resolution", &self.controls.vertical_resolution),
            ("controls.frame_rate", &self.controls.frame_rate),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                errors.push(ValidationError::invalid_field(field, "must not be empty"));
            }
        }
        for (i, (field, name)) in names.iter().enumerate() {
            if names[..i].iter().any(|(_, other)| other == name) {
                errors.push(ValidationError::invalid_field(
                    *field,
                    format!("duplicates control '{}'", name),
                ));
            }
        }

        match ValidationError::from_list(errors) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.device, PathBuf::from("/dev/s4-video"));
        assert_eq!(config.utility, PathBuf::from("v4l2-ctl"));
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.read_timeout, None);
        assert!(config.console_output);
        assert_eq!(config.controls.frame_rate, "s4_estimated_framerate");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = MonitorConfig {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { ref field, .. } if field == "poll_interval"));
    }

    #[test]
    fn test_collects_every_problem() {
        let config = MonitorConfig {
            device: PathBuf::new(),
            controls: ControlNames {
                horizontal_resolution: "width".to_string(),
                vertical_resolution: "width".to_string(),
                frame_rate: " ".to_string(),
            },
            ..Default::default()
        };
        match config.validate().unwrap_err() {
            ValidationError::Multiple(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }
}

//! Core monitoring types.

mod builder;
mod config;
mod detector;
mod monitor;
mod sample;
mod validation;

pub use builder::SignalMonitorBuilder;
pub use config::{ControlNames, DEFAULT_POLL_INTERVAL, MonitorConfig};
pub use detector::ChangeDetector;
pub use monitor::{MonitorHandle, SignalMonitor};
pub use sample::{REPORT_PREFIX, Resolution, STARTUP_BANNER, Sample, SignalChange, SignalMode};
pub use validation::Validate;

//! # s4-signal-monitor
//!
//! Watches the video input of an S4 capture card and reports when the incoming
//! signal's resolution or frame rate changes.
//!
//! ## Overview
//!
//! The driver exposes the detected signal as three integer V4L2 controls. The
//! monitor polls them every two seconds through `v4l2-ctl` and prints one line
//! per change:
//!
//! ```text
//! [S4] Starting video signal monitor...
//! [S4] Video signal changed: 1920x1080 @ 60fps
//! [S4] Video signal changed: 1280x720 @ 60fps
//! ```
//!
//! A failed read (busy device, missing control, odd output) is not an error; the
//! cycle is skipped and the last reported mode is kept.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use s4_signal_monitor::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let monitor = SignalMonitor::builder()
//!     .with_device("/dev/s4-video")
//!     .build()?;
//!
//! let _sub = monitor.subscribe(|change| {
//!     eprintln!("new mode: {}", change.current);
//! });
//!
//! monitor.run_until(async {
//!     let _ = tokio::signal::ctrl_c().await;
//! }).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing without hardware
//!
//! Any [`sources::ControlSource`] can replace the control utility;
//! [`sources::ScriptedSource`] replays queued readings.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod notify;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ControlNames, MonitorConfig, MonitorHandle, Resolution, Sample, SignalChange,
        SignalMode, SignalMonitor, SignalMonitorBuilder, Validate,
    };
    pub use crate::error::{MonitorError, Result, ValidationError};
}

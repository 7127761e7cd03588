//! Control source backed by the `v4l2-ctl` utility.

use super::ControlSource;
use crate::error::ControlError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default control utility.
pub const DEFAULT_UTILITY: &str = "v4l2-ctl";

/// Default capture device node.
pub const DEFAULT_DEVICE: &str = "/dev/s4-video";

/// Reads controls by running `<utility> -d <device> --get-ctrl=<name>`.
///
/// The utility is expected to print `<anything>: <integer>` on one line.
///
/// # Examples
///
/// ```rust,no_run
/// use s4_signal_monitor::sources::{ControlSource, V4l2CtlSource};
///
/// # async fn example() {
/// let source = V4l2CtlSource::new("/dev/video0");
/// if let Some(width) = source.read("s4_horizontal_resolution").await {
///     println!("width = {}", width);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct V4l2CtlSource {
    utility: PathBuf,
    device: PathBuf,
    timeout: Option<Duration>,
}

impl V4l2CtlSource {
    /// Create a source for `device` using the default utility and no timeout.
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            utility: PathBuf::from(DEFAULT_UTILITY),
            device: device.into(),
            timeout: None,
        }
    }

    /// Use a different control utility (a full path or a name looked up on `PATH`).
    pub fn with_utility(mut self, utility: impl Into<PathBuf>) -> Self {
        self.utility = utility.into();
        self
    }

    /// Bound each read. An expired read kills the child and counts as absent.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Device node passed to the utility.
    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Program invoked for each read.
    pub fn utility(&self) -> &Path {
        &self.utility
    }

    /// Read a control, keeping the reason when it fails.
    pub async fn try_read(&self, control: &str) -> Result<i64, ControlError> {
        let mut cmd = Command::new(&self.utility);
        cmd.arg("-d")
            .arg(&self.device)
            .arg(format!("--get-ctrl={}", control))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| ControlError::TimedOut)?,
            None => cmd.output().await,
        }
        .map_err(|source| ControlError::Launch {
            utility: self.utility.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(ControlError::ExitStatus(output.status));
        }

        let text = String::from_utf8(output.stdout).map_err(|_| ControlError::NotUtf8)?;
        parse_control_output(&text)
    }
}

#[async_trait]
impl ControlSource for V4l2CtlSource {
    async fn read(&self, control: &str) -> Option<i64> {
        match self.try_read(control).await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::trace!(control, device = %self.device.display(), error = %err, "control read unavailable");
                None
            }
        }
    }

    fn name(&self) -> String {
        format!("{}:{}", self.utility.display(), self.device.display())
    }
}

/// Extract the integer from a `--get-ctrl` reply.
///
/// Takes the text after the final colon (all of it when there is no colon),
/// trims it and parses it as a signed integer. No range checks are applied.
///
/// # Examples
///
/// ```rust
/// use s4_signal_monitor::sources::parse_control_output;
///
/// assert_eq!(parse_control_output("s4_horizontal_resolution : 1920").unwrap(), 1920);
/// assert!(parse_control_output("no colon here").is_err());
/// ```
pub fn parse_control_output(output: &str) -> Result<i64, ControlError> {
    let trimmed = output.trim();
    let value = trimmed.rsplit(':').next().unwrap_or(trimmed).trim();
    value.parse::<i64>().map_err(|_| ControlError::Malformed {
        output: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_reply() {
        assert_eq!(parse_control_output("s4_horizontal_resolution : 1920").unwrap(), 1920);
        assert_eq!(parse_control_output("s4_estimated_framerate: 60\n").unwrap(), 60);
    }

    #[test]
    fn test_parse_uses_final_colon() {
        assert_eq!(parse_control_output("a: b: c: 720").unwrap(), 720);
        assert!(parse_control_output("width: 1920 :").is_err());
    }

    #[test]
    fn test_parse_without_colon() {
        assert!(matches!(
            parse_control_output("no colon here"),
            Err(ControlError::Malformed { .. })
        ));
        // a bare integer has no colon to split on and is taken whole
        assert_eq!(parse_control_output("  1080 ").unwrap(), 1080);
    }

    #[test]
    fn test_parse_is_permissive_about_range() {
        assert_eq!(parse_control_output("s4_vertical_resolution: 0").unwrap(), 0);
        assert_eq!(parse_control_output("s4_vertical_resolution: -4").unwrap(), -4);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_control_output("").is_err());
        assert!(parse_control_output("s4_horizontal_resolution:").is_err());
    }

    #[test]
    fn test_name() {
        let source = V4l2CtlSource::new("/dev/s4-video");
        assert_eq!(source.name(), "v4l2-ctl:/dev/s4-video");
        assert_eq!(source.utility(), Path::new(DEFAULT_UTILITY));
    }

    #[tokio::test]
    async fn test_missing_utility_is_absent() {
        let source = V4l2CtlSource::new("/dev/s4-video")
            .with_utility("/nonexistent/s4-monitor-test/v4l2-ctl");

        assert!(matches!(
            source.try_read("s4_horizontal_resolution").await,
            Err(ControlError::Launch { .. })
        ));
        assert_eq!(source.read("s4_horizontal_resolution").await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_utility_is_absent() {
        let source = V4l2CtlSource::new("/dev/s4-video").with_utility("false");

        assert!(matches!(
            source.try_read("s4_horizontal_resolution").await,
            Err(ControlError::ExitStatus(_))
        ));
        assert_eq!(source.read("s4_horizontal_resolution").await, None);
    }
}

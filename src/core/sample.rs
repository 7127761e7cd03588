//! Poll samples and the signal modes derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix carried by every line the monitor prints.
pub const REPORT_PREFIX: &str = "[S4]";

/// Banner printed once when the monitor starts.
pub const STARTUP_BANNER: &str = "[S4] Starting video signal monitor...";

/// One poll cycle's readings. Any field may be missing when its read failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Active pixels per line
    pub horizontal_resolution: Option<i64>,
    /// Active lines per frame
    pub vertical_resolution: Option<i64>,
    /// Estimated frames per second
    pub frame_rate: Option<i64>,
}

impl Sample {
    /// A sample where all three reads succeeded.
    pub fn new(width: i64, height: i64, frame_rate: i64) -> Self {
        Self {
            horizontal_resolution: Some(width),
            vertical_resolution: Some(height),
            frame_rate: Some(frame_rate),
        }
    }

    /// The signal mode, if every field is present.
    pub fn mode(&self) -> Option<SignalMode> {
        match (self.horizontal_resolution, self.vertical_resolution, self.frame_rate) {
            (Some(width), Some(height), Some(frame_rate)) => Some(SignalMode {
                resolution: Resolution { width, height },
                frame_rate,
            }),
            _ => None,
        }
    }

    /// True when every field is present.
    pub fn is_complete(&self) -> bool {
        self.mode().is_some()
    }
}

impl From<SignalMode> for Sample {
    fn from(mode: SignalMode) -> Self {
        Self::new(mode.resolution.width, mode.resolution.height, mode.frame_rate)
    }
}

/// Frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    /// Horizontal size
    pub width: i64,
    /// Vertical size
    pub height: i64,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A fully read signal: resolution plus frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalMode {
    /// Frame size
    pub resolution: Resolution,
    /// Frames per second
    pub frame_rate: i64,
}

impl fmt::Display for SignalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}fps", self.resolution, self.frame_rate)
    }
}

/// A detected transition to a new signal mode.
///
/// Its `Display` form is the console report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalChange {
    /// Mode reported before this change, `None` for the first report
    pub previous: Option<SignalMode>,
    /// Mode now present on the input
    pub current: SignalMode,
}

impl SignalChange {
    /// True when the frame size changed, as opposed to only the frame rate.
    pub fn resolution_changed(&self) -> bool {
        self.previous
            .is_none_or(|prev| prev.resolution != self.current.resolution)
    }
}

impl fmt::Display for SignalChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Video signal changed: {}", REPORT_PREFIX, self.current)
    }
}

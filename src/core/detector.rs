//! Previous-versus-current change detection.

use crate::core::{Sample, SignalChange, SignalMode};
use crate::error::ValidationError;
use std::sync::Arc;

/// Type alias for signal acceptance hooks.
pub(crate) type ModeValidator =
    Arc<dyn Fn(&SignalMode) -> std::result::Result<(), ValidationError> + Send + Sync>;

/// Decides when a sample is worth reporting.
///
/// Holds the last fully valid mode that was reported. Partial samples, and
/// complete samples refused by the optional validator, never replace it.
///
/// # Examples
///
/// ```rust
/// use s4_signal_monitor::core::{ChangeDetector, Sample};
///
/// let mut detector = ChangeDetector::new();
/// assert!(detector.observe(&Sample::new(1920, 1080, 60)).is_some());
/// assert!(detector.observe(&Sample::new(1920, 1080, 60)).is_none());
/// assert!(detector.observe(&Sample::default()).is_none());
/// assert!(detector.observe(&Sample::new(1280, 720, 60)).is_some());
/// ```
#[derive(Default, Clone)]
pub struct ChangeDetector {
    last_known: Option<SignalMode>,
    validator: Option<ModeValidator>,
}

impl ChangeDetector {
    /// Create a detector with no history and no validator.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_validator(mut self, validator: Option<ModeValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Feed one sample. Returns the change to report, if any.
    pub fn observe(&mut self, sample: &Sample) -> Option<SignalChange> {
        let Some(current) = sample.mode() else {
            tracing::trace!(?sample, "incomplete sample ignored");
            return None;
        };

        if let Some(validator) = &self.validator {
            if let Err(err) = validator(&current) {
                tracing::trace!(mode = %current, error = %err, "sample rejected");
                return None;
            }
        }

        if self.last_known == Some(current) {
            return None;
        }

        let change = SignalChange {
            previous: self.last_known.replace(current),
            current,
        };
        Some(change)
    }

    /// The most recently reported mode.
    pub fn last_known(&self) -> Option<SignalMode> {
        self.last_known
    }
}

impl std::fmt::Debug for ChangeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeDetector")
            .field("last_known", &self.last_known)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

//! Scripted control source for tests and simulations.

use super::ControlSource;
use crate::core::{ControlNames, Sample};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Control source that replays queued values instead of touching hardware.
///
/// Each control has its own FIFO. A read pops the next value for that control;
/// an empty or unknown control reads as absent.
///
/// # Examples
///
/// ```rust
/// use s4_signal_monitor::core::{ControlNames, Sample};
/// use s4_signal_monitor::sources::{ControlSource, ScriptedSource};
///
/// # tokio_test::block_on(async {
/// let source = ScriptedSource::new(ControlNames::default());
/// source.push_sample(Sample::new(1920, 1080, 60));
///
/// assert_eq!(source.read("s4_horizontal_resolution").await, Some(1920));
/// assert_eq!(source.read("s4_horizontal_resolution").await, None);
/// # });
/// ```
pub struct ScriptedSource {
    controls: ControlNames,
    queues: Mutex<HashMap<String, VecDeque<Option<i64>>>>,
    reads: AtomicUsize,
}

impl ScriptedSource {
    /// Create an empty script for the given control names.
    pub fn new(controls: ControlNames) -> Self {
        Self {
            controls,
            queues: Mutex::new(HashMap::new()),
            reads: AtomicUsize::new(0),
        }
    }

    /// Queue one value for a single control.
    pub fn push(&self, control: &str, value: Option<i64>) {
        let mut queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        queues.entry(control.to_string()).or_default().push_back(value);
    }

    /// Queue one poll cycle worth of readings.
    pub fn push_sample(&self, sample: Sample) {
        self.push(&self.controls.horizontal_resolution, sample.horizontal_resolution);
        self.push(&self.controls.vertical_resolution, sample.vertical_resolution);
        self.push(&self.controls.frame_rate, sample.frame_rate);
    }

    /// Number of reads served so far, scripted or not.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of values still queued across all controls.
    pub fn remaining(&self) -> usize {
        let queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        queues.values().map(VecDeque::len).sum()
    }
}

#[async_trait]
impl ControlSource for ScriptedSource {
    async fn read(&self, control: &str) -> Option<i64> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        queues.get_mut(control).and_then(VecDeque::pop_front).flatten()
    }

    fn name(&self) -> String {
        "scripted".to_string()
    }
}

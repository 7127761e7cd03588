//! The poll loop.

use crate::core::{ChangeDetector, MonitorConfig, Sample, SignalChange, SignalMode};
use crate::error::{MonitorError, Result};
use crate::notify::{SubscriberRegistry, SubscriptionHandle};
use crate::sources::ControlSource;
use arc_swap::ArcSwapOption;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Polls three controls on a fixed cadence and reports mode changes.
///
/// Each cycle reads horizontal resolution, vertical resolution and frame rate,
/// feeds them to a [`ChangeDetector`], and on a change prints the report line,
/// publishes the new mode and notifies subscribers. The loop then sleeps for
/// the configured interval.
///
/// # Examples
///
/// ```rust,no_run
/// use s4_signal_monitor::prelude::*;
///
/// # async fn example() -> Result<()> {
/// let monitor = SignalMonitor::builder().build()?;
/// let handle = monitor.spawn();
///
/// // ... later
/// println!("last mode: {:?}", handle.last_known());
/// handle.stop().await?;
/// # Ok(())
/// # }
/// ```
pub struct SignalMonitor {
    config: MonitorConfig,
    source: Box<dyn ControlSource>,
    detector: ChangeDetector,
    last_known: Arc<ArcSwapOption<SignalMode>>,
    subscribers: SubscriberRegistry,
}

impl SignalMonitor {
    pub(crate) fn from_parts(
        config: MonitorConfig,
        source: Box<dyn ControlSource>,
        detector: ChangeDetector,
    ) -> Self {
        Self {
            config,
            source,
            detector,
            last_known: Arc::new(ArcSwapOption::empty()),
            subscribers: SubscriberRegistry::new(),
        }
    }

    /// The settings this monitor runs with.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// The most recently reported mode.
    pub fn last_known(&self) -> Option<SignalMode> {
        self.last_known.load_full().map(|mode| *mode)
    }

    /// Subscribe to signal changes.
    ///
    /// Returns a handle that can be dropped to unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&SignalChange) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Read all three controls once.
    pub async fn sample(&self) -> Sample {
        let controls = &self.config.controls;
        Sample {
            horizontal_resolution: self.source.read(&controls.horizontal_resolution).await,
            vertical_resolution: self.source.read(&controls.vertical_resolution).await,
            frame_rate: self.source.read(&controls.frame_rate).await,
        }
    }

    /// Run one read-compare step without sleeping.
    ///
    /// Returns the change that was reported, if any. The only await points
    /// are the reads; once a change is accepted it is printed, published and
    /// delivered to subscribers without yielding.
    pub async fn poll_once(&mut self) -> Option<SignalChange> {
        let sample = self.sample().await;
        let change = self.detector.observe(&sample)?;

        if self.config.console_output {
            println!("{}", change);
        }
        tracing::info!(
            previous = ?change.previous,
            current = %change.current,
            "video signal changed"
        );

        self.last_known.store(Some(Arc::new(change.current)));
        self.subscribers.notify_all(&change);
        Some(change)
    }

    /// Poll until `shutdown` completes.
    ///
    /// The shutdown future is checked throughout the cycle, so a stop request
    /// does not wait for a pending read or the rest of the sleep.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::debug!(
            source = %self.source.name(),
            interval = ?self.config.poll_interval,
            "signal monitor started"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = self.cycle() => {}
            }
        }

        tracing::debug!("signal monitor stopped");
    }

    /// Poll until the process is terminated.
    pub async fn run(self) {
        self.run_until(std::future::pending()).await
    }

    /// Run the loop on a background task.
    pub fn spawn(self) -> MonitorHandle {
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let last_known = Arc::clone(&self.last_known);
        let task = tokio::spawn(self.run_until(async move {
            // a dropped sender also stops the loop
            let _ = stop_rx.await;
        }));

        MonitorHandle {
            stop_tx: Some(stop_tx),
            task,
            last_known,
        }
    }

    async fn cycle(&mut self) {
        self.poll_once().await;
        tokio::time::sleep(self.config.poll_interval).await;
    }
}

impl std::fmt::Debug for SignalMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalMonitor")
            .field("config", &self.config)
            .field("source", &self.source.name())
            .field("detector", &self.detector)
            .finish()
    }
}

/// Handle to a monitor running on a background task.
///
/// Dropping the handle stops the monitor without waiting for it.
pub struct MonitorHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
    last_known: Arc<ArcSwapOption<SignalMode>>,
}

impl MonitorHandle {
    /// The most recently reported mode. Lock-free.
    pub fn last_known(&self) -> Option<SignalMode> {
        self.last_known.load_full().map(|mode| *mode)
    }

    /// True once the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Ask the monitor to stop and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::TaskFailed`] if the task panicked or was aborted.
    pub async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        (&mut self.task)
            .await
            .map_err(|e| MonitorError::TaskFailed(e.to_string()))
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

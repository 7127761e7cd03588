//! Control source trait.

use async_trait::async_trait;
use std::sync::Arc;

/// Trait for reading integer device controls.
///
/// Implement this trait to feed the monitor from something other than the
/// control utility (a direct ioctl binding, a scripted test double, a remote
/// agent).
///
/// A read never fails from the caller's point of view: any problem is reported
/// as `None`, meaning "no valid reading this cycle".
#[async_trait]
pub trait ControlSource: Send + Sync {
    /// Read the current value of the named control.
    async fn read(&self, control: &str) -> Option<i64>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;
}

#[async_trait]
impl<T: ControlSource + ?Sized> ControlSource for Arc<T> {
    async fn read(&self, control: &str) -> Option<i64> {
        (**self).read(control).await
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

#[async_trait]
impl<T: ControlSource + ?Sized> ControlSource for Box<T> {
    async fn read(&self, control: &str) -> Option<i64> {
        (**self).read(control).await
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

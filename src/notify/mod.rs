//! Signal change notification system.
//!
//! Lets callers register callbacks that run whenever the monitor reports a new mode.

pub mod subscriber;

pub use subscriber::{SubscriberRegistry, SubscriptionHandle};

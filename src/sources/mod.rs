//! Control source implementations.

mod control_source;
mod scripted;
mod v4l2;

pub use control_source::ControlSource;
pub use scripted::ScriptedSource;
pub use v4l2::{DEFAULT_DEVICE, DEFAULT_UTILITY, V4l2CtlSource, parse_control_output};

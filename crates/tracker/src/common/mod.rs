//! Common types shared across the tracker.
//!
//! This module collects the frame-number newtypes and the error type used by
//! every other module in the crate.

/// Tracker error definitions.
pub mod error;
/// Physical/virtual frame number and core identifier newtypes.
pub mod frame;

pub use self::error::StatError;
pub use self::frame::{CoreId, PhysFrame, VirtFrame};

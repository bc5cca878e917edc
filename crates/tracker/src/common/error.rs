//! Tracker error definitions.
//!
//! This module defines the error type returned by the public tracker
//! operations. It provides:
//! 1. **Caller-Contract Violations:** Mapping a frame that was never populated,
//!    or populating the registry twice.
//! 2. **Recoverable Classification Failures:** Event tags the tracker does not
//!    recognize, which leave all counters untouched.
//! 3. **Error Trait Integration:** `thiserror`-derived `Display`/`Error` impls
//!    so failures compose with standard Rust error reporting.
//!
//! No public operation panics; every failure is communicated through
//! [`StatError`] so the simulator's event loop is never unwound.

use thiserror::Error;

use super::frame::PhysFrame;

/// Errors produced by the page-statistics tracker.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StatError {
    /// A caller tag did not identify any tracked cache level.
    ///
    /// Recoverable: the event is dropped and no counter is mutated.
    #[error("unknown cache level tag: {0:?}")]
    UnknownLevelTag(String),

    /// A mapping was reported for a physical frame outside the populated range.
    ///
    /// This is a caller-contract violation: the physical address space must be
    /// populated before any mapping call. No record is created.
    #[error("physical frame {0:?} was never populated")]
    UnpopulatedFrame(PhysFrame),

    /// The registry was asked to populate a second time.
    ///
    /// Re-populating would silently orphan existing records, so it is rejected.
    #[error("page registry is already populated")]
    AlreadyPopulated,
}

//! Per-page cache statistics tracking for tiered-memory simulation.
//!
//! This crate records, per physical page and requesting core, how cache
//! accesses at three hierarchy levels (L1D, L2C, LLC) played out, so that
//! cache behavior can be correlated with page placement across memory tiers.
//! It provides:
//! 1. **Records:** Per-page, per-level counter aggregates with a summation merge.
//! 2. **Registry:** Mapped and pending lookup tables with a single merge-and-retire
//!    transition once a virtual-to-physical mapping resolves.
//! 3. **Run Detection:** Per-core, per-level consecutive-prefetch run tracking with
//!    deferred attribution to the previously targeted page.
//! 4. **Classification:** Routing of raw cache events onto the right counters.
//! 5. **Reporting:** A pure snapshot of every mapped page plus fast/slow tier tallies.
//!
//! The simulator calls [`PageStatLogger::populate`] once at startup,
//! [`PageStatLogger::log_event`] on every relevant cache outcome, and
//! [`PageStatLogger::map_frame`] whenever the OS model resolves a mapping;
//! [`PageStatLogger::export_report`] closes out the run.

/// Common types (frame numbers, core ids, errors).
pub mod common;
/// Tracker configuration (defaults, serde structure).
pub mod config;
/// Composition root: populate, map, classify, export.
pub mod logger;
/// Consecutive-prefetch run detection.
pub mod prefetch;
/// Record storage: mapped and pending tables.
pub mod registry;
/// Report snapshot types and CSV printing.
pub mod report;
/// Counter aggregates and the event vocabulary.
pub mod stats;
/// Memory-tier classification seam.
pub mod tier;

/// Error type returned by every fallible tracker operation.
pub use crate::common::StatError;
/// Main tracker type; construct with `PageStatLogger::new`.
pub use crate::logger::PageStatLogger;
/// Report snapshot produced by `PageStatLogger::export_report`.
pub use crate::report::Report;

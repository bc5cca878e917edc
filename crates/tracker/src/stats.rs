//! Per-page statistics aggregates and event vocabulary.
//!
//! This module defines the value types the tracker accumulates into. It provides:
//! 1. **`LevelStats`:** Counter aggregate for one cache level on one page.
//! 2. **`PageRecord`:** Page identity plus one `LevelStats` per tracked level.
//! 3. **`Level` / `EventKind`:** The classification vocabulary for incoming events.
//!
//! All counters are non-negative and non-decreasing for the lifetime of a
//! record; merging records is field-by-field summation with no normalization.

use serde::Serialize;

use crate::common::{CoreId, PhysFrame, VirtFrame};

/// A position in the tracked cache hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Level {
    /// First-level data cache.
    L1d,
    /// Second-level (mid) cache.
    L2c,
    /// Last-level cache.
    Llc,
}

/// All levels the tracker reports on, in hierarchy order.
pub const LEVELS: [Level; 3] = [Level::L1d, Level::L2c, Level::Llc];

impl Level {
    /// Classifies a caller component tag into a cache level.
    ///
    /// Cache controllers identify themselves with component names such as
    /// `"cpu0_L1D"` or `"LLC"`; the level marker may appear anywhere in the
    /// tag. Returns `None` for tags naming no tracked level (e.g. an
    /// instruction cache), which callers surface as a recoverable error.
    pub fn from_caller(caller: &str) -> Option<Self> {
        if caller.contains("L1D") {
            Some(Self::L1d)
        } else if caller.contains("L2C") {
            Some(Self::L2c)
        } else if caller.contains("LLC") {
            Some(Self::Llc)
        } else {
            None
        }
    }
}

/// The outcome kinds a cache level reports for an access or prefetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// Demand access serviced by the level.
    Hit,
    /// Demand access missed the level.
    Miss,
    /// Demand hit on a block brought in by a prior prefetch. Counts as a hit
    /// plus a useful-prefetch tag.
    UsefulPrefetch,
    /// Prefetch request issued targeting the page.
    Prefetch,
    /// Prefetched block evicted without ever being consumed.
    UselessPrefetch,
    /// Demand access that hit an in-flight prefetch in the MSHR. Not yet a
    /// completed hit.
    MshrPrefetchHit,
}

/// Counter aggregate for one cache level on one page.
///
/// An open, named-field aggregate: new counters can be added without
/// breaking the merge-by-summation contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    /// Demand hits (includes useful prefetch hits).
    pub hits: u64,
    /// Demand misses.
    pub misses: u64,
    /// Prefetch requests issued targeting this page at this level.
    pub prefetches: u64,
    /// Subset of `hits` satisfied by a previously prefetched block.
    pub useful_prefetch_hits: u64,
    /// Prefetches that were never consumed before eviction.
    pub useless_prefetches: u64,
    /// Accesses that hit an in-flight prefetch request in the MSHR.
    pub mshr_prefetch_hits: u64,
    /// Sum of closed consecutive-prefetch run lengths attributed to this page.
    pub prefetch_degree_sum: u64,
    /// Number of closed runs attributed to this page.
    pub prefetch_degree_count: u64,
}

impl LevelStats {
    /// Folds another aggregate into this one, field by field.
    ///
    /// Pure addition, so merging is commutative and associative per field.
    pub fn merge(&mut self, other: &Self) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.prefetches += other.prefetches;
        self.useful_prefetch_hits += other.useful_prefetch_hits;
        self.useless_prefetches += other.useless_prefetches;
        self.mshr_prefetch_hits += other.mshr_prefetch_hits;
        self.prefetch_degree_sum += other.prefetch_degree_sum;
        self.prefetch_degree_count += other.prefetch_degree_count;
    }

    /// Mean closed-run length for prefetches attributed to this page.
    ///
    /// # Returns
    ///
    /// `None` until at least one run has closed against this page.
    pub fn mean_prefetch_degree(&self) -> Option<f64> {
        if self.prefetch_degree_count == 0 {
            return None;
        }
        Some(self.prefetch_degree_sum as f64 / self.prefetch_degree_count as f64)
    }
}

/// Statistics record for one page: identity plus one [`LevelStats`] per level.
///
/// A record is either *pending* (keyed by (virtual frame, core), physical
/// frame unknown) or *mapped* (keyed by physical frame, authoritative). The
/// pending-to-mapped transition happens at most once and never reverses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRecord {
    /// Physical frame, `None` while the record is pending.
    pub physical_frame: Option<PhysFrame>,
    /// Program-visible frame identity.
    pub virtual_frame: VirtFrame,
    /// Core the page belongs to.
    pub owning_core: CoreId,
    /// Whether the virtual-to-physical mapping has resolved.
    pub mapped: bool,
    /// First-level data cache counters.
    pub l1d: LevelStats,
    /// Second-level cache counters.
    pub l2c: LevelStats,
    /// Last-level cache counters.
    pub llc: LevelStats,
}

impl PageRecord {
    /// Creates an empty pending record for `(virt, core)`.
    pub fn pending(virt: VirtFrame, core: CoreId) -> Self {
        Self {
            physical_frame: None,
            virtual_frame: virt,
            owning_core: core,
            mapped: false,
            l1d: LevelStats::default(),
            l2c: LevelStats::default(),
            llc: LevelStats::default(),
        }
    }

    /// Creates an empty, not-yet-mapped record for a populated physical frame.
    pub fn populated(frame: PhysFrame) -> Self {
        Self {
            physical_frame: Some(frame),
            virtual_frame: VirtFrame::new(0),
            owning_core: CoreId::new(0),
            mapped: false,
            l1d: LevelStats::default(),
            l2c: LevelStats::default(),
            llc: LevelStats::default(),
        }
    }

    /// Borrows the counters for `level`.
    #[inline]
    pub const fn level_stats(&self, level: Level) -> &LevelStats {
        match level {
            Level::L1d => &self.l1d,
            Level::L2c => &self.l2c,
            Level::Llc => &self.llc,
        }
    }

    /// Mutably borrows the counters for `level`.
    #[inline]
    pub const fn level_stats_mut(&mut self, level: Level) -> &mut LevelStats {
        match level {
            Level::L1d => &mut self.l1d,
            Level::L2c => &mut self.l2c,
            Level::Llc => &mut self.llc,
        }
    }

    /// Folds all of `other`'s counters into this record.
    ///
    /// Identity fields are untouched; only statistics move.
    pub fn merge_from(&mut self, other: &Self) {
        self.l1d.merge(&other.l1d);
        self.l2c.merge(&other.l2c);
        self.llc.merge(&other.llc);
    }
}

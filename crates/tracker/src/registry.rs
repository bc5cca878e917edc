//! Page record registry: mapped and pending lookup tables.
//!
//! This module owns every [`PageRecord`] the tracker creates. It provides:
//! 1. **Mapped Table:** Physical-frame-keyed records, pre-populated for the
//!    whole simulated address range at startup.
//! 2. **Pending Table:** (virtual frame, core)-keyed records for events that
//!    arrive before their physical mapping resolves.
//! 3. **Merge-and-Retire:** The single pending-to-mapped transition that folds
//!    accumulated statistics into the authoritative record.
//!
//! The two tables are disjoint by construction: a logical page is reachable
//! through exactly one of them at any time, which rules out double counting.

use std::collections::BTreeMap;

use crate::common::{CoreId, PhysFrame, StatError, VirtFrame};
use crate::stats::PageRecord;

/// Registry of page-statistics records.
///
/// Lookups are `O(log n)`; the tables are ordered so report rows come out in
/// ascending physical-frame order without sorting.
#[derive(Debug, Default)]
pub struct PageRegistry {
    /// Physical frame -> record, the known-mapped universe.
    mapped: BTreeMap<PhysFrame, PageRecord>,
    /// (virtual frame, core) -> record whose physical frame is not yet known.
    pending: BTreeMap<(VirtFrame, CoreId), PageRecord>,
    /// Number of frames inserted by `populate`; zero until populated.
    populated: u64,
}

impl PageRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the mapped table with `count` empty records for frames
    /// `base .. base + count`.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::AlreadyPopulated`] if called more than once;
    /// re-populating would orphan the records already handed out.
    pub fn populate(&mut self, count: u64, base: PhysFrame) -> Result<(), StatError> {
        if self.populated != 0 {
            return Err(StatError::AlreadyPopulated);
        }
        for i in 0..count {
            let frame = base.offset(i);
            let _ = self.mapped.insert(frame, PageRecord::populated(frame));
        }
        self.populated = count;
        Ok(())
    }

    /// Looks up the record for a populated physical frame.
    pub fn find_mapped(&self, frame: PhysFrame) -> Option<&PageRecord> {
        self.mapped.get(&frame)
    }

    /// Mutable lookup of the record for a populated physical frame.
    pub fn find_mapped_mut(&mut self, frame: PhysFrame) -> Option<&mut PageRecord> {
        self.mapped.get_mut(&frame)
    }

    /// Looks up a pending record by its (virtual frame, core) key.
    pub fn find_pending(&self, virt: VirtFrame, core: CoreId) -> Option<&PageRecord> {
        self.pending.get(&(virt, core))
    }

    /// Resolves the record an event should accumulate into.
    ///
    /// Resolution order is load-bearing:
    /// 1. a pending record for `(virt, core)`, so pre-mapping events keep
    ///    accumulating in one place and a stale physical frame on a late
    ///    event cannot split the page's statistics;
    /// 2. the mapped record for `phys` when the frame is known;
    /// 3. a freshly allocated all-zero pending record for `(virt, core)`.
    pub fn record_for_event(
        &mut self,
        phys: Option<PhysFrame>,
        virt: VirtFrame,
        core: CoreId,
    ) -> &mut PageRecord {
        // Two-phase lookup keeps the borrow checker happy: decide which table
        // wins first, then take the mutable borrow.
        let mapped_key = if self.pending.contains_key(&(virt, core)) {
            None
        } else {
            phys.filter(|frame| self.mapped.contains_key(frame))
        };
        match mapped_key {
            Some(frame) => self
                .mapped
                .entry(frame)
                .or_insert_with(|| PageRecord::populated(frame)),
            None => self
                .pending
                .entry((virt, core))
                .or_insert_with(|| PageRecord::pending(virt, core)),
        }
    }

    /// Resolves a virtual-to-physical mapping.
    ///
    /// Stamps identity onto the populated record for `phys`, marks it mapped,
    /// and, if a pending record exists for `(virt, core)`, folds its
    /// statistics in and retires the pending entry.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnpopulatedFrame`] if `phys` was never populated.
    /// The physical address space must be populated before any mapping call;
    /// nothing is created on this path.
    ///
    /// # Returns
    ///
    /// Whether a pending record was merged and retired.
    pub fn map_frame(
        &mut self,
        phys: PhysFrame,
        virt: VirtFrame,
        core: CoreId,
    ) -> Result<bool, StatError> {
        // Check before any mutation: a failed mapping call must leave both
        // tables exactly as they were.
        if !self.mapped.contains_key(&phys) {
            return Err(StatError::UnpopulatedFrame(phys));
        }
        let folded = self.pending.remove(&(virt, core));
        let record = self
            .mapped
            .entry(phys)
            .or_insert_with(|| PageRecord::populated(phys));
        record.physical_frame = Some(phys);
        record.virtual_frame = virt;
        record.owning_core = core;
        record.mapped = true;
        match folded {
            Some(pending) => {
                record.merge_from(&pending);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Iterates all populated records in ascending physical-frame order.
    pub fn mapped_records(&self) -> impl Iterator<Item = &PageRecord> {
        self.mapped.values()
    }

    /// Number of frames inserted by `populate`.
    pub const fn populated_pages(&self) -> u64 {
        self.populated
    }

    /// Number of live pending records.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

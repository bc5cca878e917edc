//! Page-statistics logger: the tracker's composition root.
//!
//! This module wires the registry, the prefetch run tracker, and the tier
//! classifier together behind the four-call surface the simulator uses:
//! 1. **`populate`:** Pre-allocate records for the physical address range.
//! 2. **`map_frame`:** Resolve a virtual-to-physical mapping and fold in any
//!    statistics that accumulated before the mapping was known.
//! 3. **`log_event`:** Classify one cache-level outcome into counter updates.
//! 4. **`export_report`:** Snapshot every mapped page's counters.
//!
//! Single-threaded by design: the simulator's event loop is the only caller,
//! so no operation locks or blocks.

use std::fmt;

use tracing::{debug, info, warn};

use crate::common::{CoreId, PhysFrame, StatError, VirtFrame};
use crate::config::TrackerConfig;
use crate::prefetch::PrefetchRunTracker;
use crate::registry::PageRegistry;
use crate::report::{Report, ReportRow};
use crate::stats::{EventKind, Level};
use crate::tier::{ThresholdClassifier, TierClassifier};

/// Per-page cache statistics logger.
///
/// # Examples
///
/// ```
/// use pagestat_core::common::{CoreId, PhysFrame, VirtFrame};
/// use pagestat_core::config::TrackerConfig;
/// use pagestat_core::logger::PageStatLogger;
/// use pagestat_core::stats::EventKind;
///
/// let mut logger = PageStatLogger::new(&TrackerConfig::default());
/// logger.populate(4, PhysFrame::new(0x80000))?;
/// logger.log_event(
///     "cpu0_L1D",
///     EventKind::Miss,
///     Some(PhysFrame::new(0x80000)),
///     VirtFrame::new(7),
///     CoreId::new(0),
/// )?;
/// logger.map_frame(PhysFrame::new(0x80000), VirtFrame::new(7), CoreId::new(0))?;
/// let report = logger.export_report();
/// assert_eq!(report.rows[0].l1d.misses, 1);
/// # Ok::<(), pagestat_core::common::StatError>(())
/// ```
pub struct PageStatLogger {
    /// Record storage: mapped and pending tables.
    registry: PageRegistry,
    /// Per-core, per-level consecutive-prefetch detection.
    runs: PrefetchRunTracker,
    /// Fast/slow tier decision for mapped frames.
    classifier: Box<dyn TierClassifier>,
    /// Mappings resolved into the fast tier.
    pages_mapped_fast: u64,
    /// Mappings resolved into the slow tier.
    pages_mapped_slow: u64,
}

impl PageStatLogger {
    /// Creates a logger using the threshold tier classifier from `config`.
    pub fn new(config: &TrackerConfig) -> Self {
        Self::with_classifier(config, Box::new(ThresholdClassifier::from_config(config)))
    }

    /// Creates a logger with a caller-supplied tier classifier.
    pub fn with_classifier(config: &TrackerConfig, classifier: Box<dyn TierClassifier>) -> Self {
        Self {
            registry: PageRegistry::new(),
            runs: PrefetchRunTracker::new(config.num_cores),
            classifier,
            pages_mapped_fast: 0,
            pages_mapped_slow: 0,
        }
    }

    /// Pre-allocates empty records for frames `base .. base + page_count`.
    ///
    /// Called once before simulation begins.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::AlreadyPopulated`] on a second call.
    pub fn populate(&mut self, page_count: u64, base: PhysFrame) -> Result<(), StatError> {
        info!(
            pages = page_count,
            base = base.val(),
            "populating page statistics map"
        );
        self.registry.populate(page_count, base)
    }

    /// Resolves a virtual-to-physical mapping.
    ///
    /// Any statistics accumulated against the pending `(virt, core)` key are
    /// merged into the record for `phys`, and the mapping is tallied against
    /// the fast or slow tier.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnpopulatedFrame`] if `phys` was never populated;
    /// nothing is created or mutated in that case.
    pub fn map_frame(
        &mut self,
        phys: PhysFrame,
        virt: VirtFrame,
        core: CoreId,
    ) -> Result<(), StatError> {
        let _ = self.registry.map_frame(phys, virt, core)?;
        if self.classifier.is_slow_tier(phys) {
            self.pages_mapped_slow += 1;
        } else {
            self.pages_mapped_fast += 1;
        }
        Ok(())
    }

    /// Classifies one cache-level outcome into counter updates.
    ///
    /// The caller tag names the reporting component (e.g. `"cpu0_L1D"`);
    /// `phys` may be `None` when the physical frame is not yet known, in
    /// which case the event accumulates against a pending record until
    /// [`Self::map_frame`] resolves the page.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownLevelTag`] when the tag names no tracked
    /// level. No counter is mutated on that path.
    pub fn log_event(
        &mut self,
        caller: &str,
        event: EventKind,
        phys: Option<PhysFrame>,
        virt: VirtFrame,
        core: CoreId,
    ) -> Result<(), StatError> {
        let Some(level) = Level::from_caller(caller) else {
            warn!(caller, "event from unknown cache level dropped");
            return Err(StatError::UnknownLevelTag(caller.to_owned()));
        };

        let stats = self
            .registry
            .record_for_event(phys, virt, core)
            .level_stats_mut(level);
        match event {
            EventKind::Hit => stats.hits += 1,
            EventKind::Miss => stats.misses += 1,
            EventKind::UsefulPrefetch => {
                // A useful prefetch hit is a hit, additionally tagged useful.
                stats.hits += 1;
                stats.useful_prefetch_hits += 1;
            }
            EventKind::UselessPrefetch => stats.useless_prefetches += 1,
            EventKind::MshrPrefetchHit => stats.mshr_prefetch_hits += 1,
            EventKind::Prefetch => {
                stats.prefetches += 1;
                self.attribute_prefetch(level, core, phys);
            }
        }
        Ok(())
    }

    /// Feeds one prefetch into the run tracker and, when a run closes,
    /// credits its length to the page the run targeted.
    ///
    /// The closed run belongs to the *previous* target, not the frame being
    /// prefetched now. A previous target outside the populated range is
    /// expected on cold start and skipped.
    fn attribute_prefetch(&mut self, level: Level, core: CoreId, phys: Option<PhysFrame>) {
        let Some(closed) = self.runs.observe(level, core, phys) else {
            return;
        };
        match self.registry.find_mapped_mut(closed.target) {
            Some(record) => {
                let stats = record.level_stats_mut(level);
                stats.prefetch_degree_sum += closed.length;
                stats.prefetch_degree_count += 1;
            }
            None => {
                debug!(
                    frame = closed.target.val(),
                    length = closed.length,
                    "no record for closed prefetch run target; attribution skipped"
                );
            }
        }
    }

    /// Snapshots every mapped page into a report.
    ///
    /// Pending records are excluded: their physical identity never resolved,
    /// so they are not reportable. Rows come out in ascending physical-frame
    /// order. Exporting mutates nothing and may be repeated.
    pub fn export_report(&self) -> Report {
        let rows: Vec<ReportRow> = self
            .registry
            .mapped_records()
            .filter(|record| record.mapped)
            .filter_map(ReportRow::from_record)
            .collect();
        info!(
            rows = rows.len(),
            fast = self.pages_mapped_fast,
            slow = self.pages_mapped_slow,
            "exporting page statistics report"
        );
        Report {
            rows,
            pages_mapped_fast: self.pages_mapped_fast,
            pages_mapped_slow: self.pages_mapped_slow,
        }
    }

    /// Read access to the underlying registry.
    pub const fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    /// Mappings tallied into the fast tier so far.
    pub const fn pages_mapped_fast(&self) -> u64 {
        self.pages_mapped_fast
    }

    /// Mappings tallied into the slow tier so far.
    pub const fn pages_mapped_slow(&self) -> u64 {
        self.pages_mapped_slow
    }
}

impl fmt::Debug for PageStatLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageStatLogger")
            .field("registry", &self.registry)
            .field("runs", &self.runs)
            .field("pages_mapped_fast", &self.pages_mapped_fast)
            .field("pages_mapped_slow", &self.pages_mapped_slow)
            .finish_non_exhaustive()
    }
}

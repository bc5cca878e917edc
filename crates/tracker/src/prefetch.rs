//! Consecutive-prefetch run detection.
//!
//! A multi-degree prefetch request shows up at the tracker as a burst of
//! prefetch events targeting the same frame. The run tracker detects those
//! bursts per (core, level) and reports each completed run so the logger can
//! attribute its length to the *previously* targeted page. The degree of a
//! run is only known once it terminates (a different frame is prefetched),
//! so attribution is deferred one step.
//!
//! Run-length convention: the length is the number of consecutive *repeat*
//! observations after the first, so the sequence A, A, A, B closes A's run
//! with length 2. A run of a single prefetch closes with length 0.

use crate::common::{CoreId, PhysFrame};
use crate::stats::Level;

/// A completed run handed back to the logger for attribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClosedRun {
    /// The frame every prefetch in the run targeted.
    pub target: PhysFrame,
    /// Number of repeat prefetches observed after the first.
    pub length: u64,
}

/// Run-detection state for one (core, level) slot.
#[derive(Clone, Copy, Debug, Default)]
struct RunState {
    /// Most recent prefetch target; `None` before the first observed
    /// prefetch or after an unknown-frame prefetch.
    last_target: Option<PhysFrame>,
    /// Repeat prefetches observed for `last_target` so far.
    run_length: u64,
}

/// Per-core, per-level consecutive-prefetch run detector.
///
/// Owned by the logger and reset at logger construction, which keeps the
/// logger fully re-instantiable for multi-simulation harnesses. The tracker
/// never touches page records itself; it is a pure state machine.
#[derive(Debug)]
pub struct PrefetchRunTracker {
    /// First-level slots, indexed by core.
    l1d: Vec<RunState>,
    /// Second-level slots, indexed by core.
    l2c: Vec<RunState>,
    /// Last-level slots, indexed by core.
    llc: Vec<RunState>,
}

impl PrefetchRunTracker {
    /// Creates a tracker with slots for `num_cores` cores at every level.
    pub fn new(num_cores: usize) -> Self {
        let cores = num_cores.max(1);
        Self {
            l1d: vec![RunState::default(); cores],
            l2c: vec![RunState::default(); cores],
            llc: vec![RunState::default(); cores],
        }
    }

    /// Observes one prefetch event and reports any run it closes.
    ///
    /// A prefetch targeting the slot's stored frame extends the open run and
    /// closes nothing. Any other target (including an unknown frame) closes
    /// the open run, if one exists, and becomes the new stored target.
    ///
    /// # Arguments
    ///
    /// * `level` - Cache level that issued the prefetch.
    /// * `core` - Requesting core.
    /// * `target` - Targeted physical frame, when known.
    ///
    /// # Returns
    ///
    /// The run this observation closed, if any. The very first prefetch on a
    /// slot closes nothing.
    pub fn observe(
        &mut self,
        level: Level,
        core: CoreId,
        target: Option<PhysFrame>,
    ) -> Option<ClosedRun> {
        let state = self.slot(level, core);
        match (state.last_target, target) {
            (Some(prev), Some(new)) if prev == new => {
                state.run_length += 1;
                None
            }
            (prev, new) => {
                let closed = prev.map(|frame| ClosedRun {
                    target: frame,
                    length: state.run_length,
                });
                state.last_target = new;
                state.run_length = 0;
                closed
            }
        }
    }

    /// Returns the slot for `(level, core)`, growing the table if an event
    /// names a core beyond the configured count.
    fn slot(&mut self, level: Level, core: CoreId) -> &mut RunState {
        let table = match level {
            Level::L1d => &mut self.l1d,
            Level::L2c => &mut self.l2c,
            Level::Llc => &mut self.llc,
        };
        let idx = core.val();
        if idx >= table.len() {
            table.resize(idx + 1, RunState::default());
        }
        &mut table[idx]
    }
}

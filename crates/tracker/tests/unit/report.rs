//! Report export tests.
//!
//! Verifies mapped-only row selection, ordering, idempotence, tier tallies,
//! and serialization of the row sequence.

use pagestat_core::common::{CoreId, PhysFrame, VirtFrame};
use pagestat_core::config::TrackerConfig;
use pagestat_core::logger::PageStatLogger;
use pagestat_core::stats::EventKind;
use pagestat_core::tier::TierClassifier;
use pretty_assertions::assert_eq;

fn pfn(p: u64) -> PhysFrame {
    PhysFrame::new(p)
}

fn vfn(v: u64) -> VirtFrame {
    VirtFrame::new(v)
}

const CORE0: CoreId = CoreId::new(0);

// ══════════════════════════════════════════════════════════
// 1. Row selection and ordering
// ══════════════════════════════════════════════════════════

#[test]
fn premature_prefetches_then_mapping_then_hit() {
    // populate(4, 1000); two unknown-frame L1D prefetches on vfn 50;
    // map 1000 -> (50, core 0); one L1D hit on the mapped page.
    let mut logger = PageStatLogger::new(&TrackerConfig::default());
    logger.populate(4, pfn(1000)).unwrap();
    for _ in 0..2 {
        logger
            .log_event("cpu0_L1D", EventKind::Prefetch, None, vfn(50), CORE0)
            .unwrap();
    }
    logger.map_frame(pfn(1000), vfn(50), CORE0).unwrap();
    logger
        .log_event("cpu0_L1D", EventKind::Hit, Some(pfn(1000)), vfn(50), CORE0)
        .unwrap();

    let report = logger.export_report();
    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.physical_frame, pfn(1000));
    assert_eq!(row.virtual_frame, vfn(50));
    assert_eq!(row.l1d.hits, 1);
    assert_eq!(row.l1d.prefetches, 2);
    assert_eq!(logger.registry().pending_len(), 0);
}

#[test]
fn unmapped_and_pending_pages_are_excluded() {
    let mut logger = PageStatLogger::new(&TrackerConfig::default());
    logger.populate(4, pfn(1000)).unwrap();
    logger.map_frame(pfn(1002), vfn(9), CORE0).unwrap();
    // A pending record that never resolves.
    logger
        .log_event("LLC", EventKind::Miss, None, vfn(77), CORE0)
        .unwrap();

    let report = logger.export_report();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].physical_frame, pfn(1002));
}

#[test]
fn rows_come_out_in_ascending_frame_order() {
    let mut logger = PageStatLogger::new(&TrackerConfig::default());
    logger.populate(4, pfn(1000)).unwrap();
    logger.map_frame(pfn(1003), vfn(3), CORE0).unwrap();
    logger.map_frame(pfn(1000), vfn(1), CORE0).unwrap();
    logger.map_frame(pfn(1002), vfn(2), CORE0).unwrap();

    let frames: Vec<u64> = logger
        .export_report()
        .rows
        .iter()
        .map(|row| row.physical_frame.val())
        .collect();
    assert_eq!(frames, vec![1000, 1002, 1003]);
}

// ══════════════════════════════════════════════════════════
// 2. Idempotence
// ══════════════════════════════════════════════════════════

#[test]
fn export_is_a_snapshot_not_a_drain() {
    let mut logger = PageStatLogger::new(&TrackerConfig::default());
    logger.populate(4, pfn(1000)).unwrap();
    logger.map_frame(pfn(1000), vfn(50), CORE0).unwrap();
    logger
        .log_event("cpu0_L2C", EventKind::Hit, Some(pfn(1000)), vfn(50), CORE0)
        .unwrap();

    let first = logger.export_report();
    let second = logger.export_report();
    assert_eq!(first, second);
}

// ══════════════════════════════════════════════════════════
// 3. Tier summary
// ══════════════════════════════════════════════════════════

#[test]
fn threshold_classifier_splits_tier_tallies() {
    let config = TrackerConfig {
        base_frame: 1000,
        page_count: 4,
        slow_tier_base: 1002,
        ..TrackerConfig::default()
    };
    let mut logger = PageStatLogger::new(&config);
    logger.populate(config.page_count, pfn(config.base_frame)).unwrap();

    logger.map_frame(pfn(1000), vfn(1), CORE0).unwrap();
    logger.map_frame(pfn(1001), vfn(2), CORE0).unwrap();
    logger.map_frame(pfn(1003), vfn(3), CORE0).unwrap();

    let report = logger.export_report();
    assert_eq!(report.pages_mapped_fast, 2);
    assert_eq!(report.pages_mapped_slow, 1);
}

#[test]
fn custom_classifier_drives_the_tally() {
    struct OddFramesSlow;
    impl TierClassifier for OddFramesSlow {
        fn is_slow_tier(&self, frame: PhysFrame) -> bool {
            frame.val() % 2 == 1
        }
    }

    let config = TrackerConfig::default();
    let mut logger = PageStatLogger::with_classifier(&config, Box::new(OddFramesSlow));
    logger.populate(4, pfn(1000)).unwrap();
    logger.map_frame(pfn(1000), vfn(1), CORE0).unwrap();
    logger.map_frame(pfn(1001), vfn(2), CORE0).unwrap();

    assert_eq!(logger.pages_mapped_fast(), 1);
    assert_eq!(logger.pages_mapped_slow(), 1);
}

// ══════════════════════════════════════════════════════════
// 4. Serialization
// ══════════════════════════════════════════════════════════

#[test]
fn report_rows_serialize_with_stable_field_names() {
    let mut logger = PageStatLogger::new(&TrackerConfig::default());
    logger.populate(1, pfn(1000)).unwrap();
    logger.map_frame(pfn(1000), vfn(50), CORE0).unwrap();
    logger
        .log_event("cpu0_L1D", EventKind::Miss, Some(pfn(1000)), vfn(50), CORE0)
        .unwrap();

    let json = serde_json::to_value(logger.export_report()).unwrap();
    assert_eq!(json["rows"][0]["physical_frame"], 1000);
    assert_eq!(json["rows"][0]["l1d"]["misses"], 1);
    assert_eq!(json["pages_mapped_fast"], 1);
}

//! Report snapshot types and operator-facing CSV printing.
//!
//! This module defines the row sequence produced by report export. The row
//! data is the contract: external report writers consume [`Report`] (it is
//! `Serialize`) and own any on-disk schema. [`Report::print_csv`] is a
//! convenience for operator visibility that mirrors the column order below.
//!
//! Column order per row: physical frame, virtual frame, core, then for each
//! of L1D, L2C, LLC in hierarchy order: hits, misses, prefetches, useful
//! prefetch hits, useless prefetches, MSHR prefetch hits, prefetch degree
//! sum, prefetch degree count.

use serde::Serialize;

use crate::common::{CoreId, PhysFrame, VirtFrame};
use crate::stats::{LevelStats, PageRecord};

/// One mapped page's statistics snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Physical frame the page resolved to.
    pub physical_frame: PhysFrame,
    /// Program-visible frame identity.
    pub virtual_frame: VirtFrame,
    /// Core the page belongs to.
    pub core: CoreId,
    /// First-level data cache counters.
    pub l1d: LevelStats,
    /// Second-level cache counters.
    pub l2c: LevelStats,
    /// Last-level cache counters.
    pub llc: LevelStats,
}

impl ReportRow {
    /// Snapshots a record into a row.
    ///
    /// Returns `None` for records whose physical identity never resolved;
    /// those are not reportable.
    pub fn from_record(record: &PageRecord) -> Option<Self> {
        let physical_frame = record.physical_frame?;
        Some(Self {
            physical_frame,
            virtual_frame: record.virtual_frame,
            core: record.owning_core,
            l1d: record.l1d,
            l2c: record.l2c,
            llc: record.llc,
        })
    }
}

/// Full report: one row per mapped page plus tier summary counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Mapped-page rows in ascending physical-frame order.
    pub rows: Vec<ReportRow>,
    /// Pages whose mapping resolved into the fast tier.
    pub pages_mapped_fast: u64,
    /// Pages whose mapping resolved into the slow tier.
    pub pages_mapped_slow: u64,
}

impl Report {
    /// Prints the report to stdout in CSV form, followed by the tier summary.
    ///
    /// Operator convenience only; external writers should consume the row
    /// data directly.
    pub fn print_csv(&self) {
        println!("[START_PAGE_STAT]");
        println!(
            "pfn,vfn,core,{},{},{}",
            level_header("l1d"),
            level_header("l2c"),
            level_header("llc")
        );
        for row in &self.rows {
            println!(
                "{},{},{},{},{},{}",
                row.physical_frame.val(),
                row.virtual_frame.val(),
                row.core.val(),
                level_fields(&row.l1d),
                level_fields(&row.l2c),
                level_fields(&row.llc)
            );
        }
        println!(
            "[END_PAGE_STAT] mapped_pages_fast: {}, mapped_pages_slow: {}",
            self.pages_mapped_fast, self.pages_mapped_slow
        );
    }
}

/// Header fragment for one level's columns.
fn level_header(prefix: &str) -> String {
    format!(
        "{prefix}_hit,{prefix}_miss,{prefix}_prefetch,{prefix}_useful_prefetch_hit,\
         {prefix}_useless_prefetch,{prefix}_mshr_prefetch_hit,\
         {prefix}_pf_degree_sum,{prefix}_pf_degree_cnt"
    )
}

/// Value fragment for one level's columns, matching [`level_header`] order.
fn level_fields(stats: &LevelStats) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        stats.hits,
        stats.misses,
        stats.prefetches,
        stats.useful_prefetch_hits,
        stats.useless_prefetches,
        stats.mshr_prefetch_hits,
        stats.prefetch_degree_sum,
        stats.prefetch_degree_count
    )
}

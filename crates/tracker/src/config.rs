//! Configuration for the page-statistics tracker.
//!
//! This module defines the configuration structure used to parameterize a
//! tracker instance. It provides:
//! 1. **Defaults:** Baseline constants for core count, populated range, and tier split.
//! 2. **Structure:** A flat config deserializable from the simulator's JSON config blob.
//!
//! Use `TrackerConfig::default()` for standalone runs or deserialize the
//! simulator's `page_stat` config section.

use serde::Deserialize;

/// Default configuration constants for the tracker.
///
/// These values define the baseline setup when not explicitly overridden
/// by the simulator's configuration.
mod defaults {
    /// Number of simulated cores the tracker keeps per-core state for.
    pub const NUM_CORES: usize = 1;

    /// First physical frame number of the populated range.
    ///
    /// Matches a 2 GiB RAM base with 4 KiB pages (`0x8000_0000 >> 12`).
    pub const BASE_FRAME: u64 = 0x80000;

    /// Number of physical frames populated at simulation start.
    ///
    /// Covers 128 MiB of 4 KiB pages.
    pub const PAGE_COUNT: u64 = 32 * 1024;

    /// First physical frame number belonging to the slow memory tier.
    ///
    /// Frames at or above this boundary count as slow-tier in the default
    /// threshold classifier. Defaults to one page past the populated range,
    /// so everything is fast-tier unless the simulator says otherwise.
    pub const SLOW_TIER_BASE: u64 = BASE_FRAME + PAGE_COUNT;
}

/// Tracker configuration.
///
/// # Examples
///
/// ```
/// use pagestat_core::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.num_cores, 1);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Number of cores issuing events; bounds the per-core run-tracker state.
    #[serde(default = "TrackerConfig::default_num_cores")]
    pub num_cores: usize,

    /// First physical frame of the populated address range.
    #[serde(default = "TrackerConfig::default_base_frame")]
    pub base_frame: u64,

    /// Number of physical frames to populate at startup.
    #[serde(default = "TrackerConfig::default_page_count")]
    pub page_count: u64,

    /// Frame-number boundary of the slow memory tier (threshold classifier).
    #[serde(default = "TrackerConfig::default_slow_tier_base")]
    pub slow_tier_base: u64,
}

impl TrackerConfig {
    fn default_num_cores() -> usize {
        defaults::NUM_CORES
    }

    fn default_base_frame() -> u64 {
        defaults::BASE_FRAME
    }

    fn default_page_count() -> u64 {
        defaults::PAGE_COUNT
    }

    fn default_slow_tier_base() -> u64 {
        defaults::SLOW_TIER_BASE
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            num_cores: defaults::NUM_CORES,
            base_frame: defaults::BASE_FRAME,
            page_count: defaults::PAGE_COUNT,
            slow_tier_base: defaults::SLOW_TIER_BASE,
        }
    }
}

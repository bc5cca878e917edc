//! Memory-tier classification seam.
//!
//! The tracker tallies how many mapped pages landed in the fast tier (DRAM)
//! versus the slow tier (e.g. CXL-attached memory). Which tier a physical
//! frame belongs to is the memory model's decision, so the tracker only
//! defines the seam as a trait plus a simple threshold implementation for
//! address-partitioned layouts.

use crate::common::PhysFrame;
use crate::config::TrackerConfig;

/// Classifies a physical frame into the fast or slow memory tier.
pub trait TierClassifier {
    /// Returns `true` if `frame` resides in the slow tier.
    fn is_slow_tier(&self, frame: PhysFrame) -> bool;
}

/// Threshold classifier for address-partitioned tiered layouts.
///
/// Frames at or above `slow_tier_base` are slow-tier. This matches memory
/// models that carve the physical space into a DRAM region followed by a
/// slower region.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdClassifier {
    /// First frame number of the slow tier.
    pub slow_tier_base: u64,
}

impl ThresholdClassifier {
    /// Builds the classifier from the tracker configuration.
    pub const fn from_config(config: &TrackerConfig) -> Self {
        Self {
            slow_tier_base: config.slow_tier_base,
        }
    }
}

impl TierClassifier for ThresholdClassifier {
    fn is_slow_tier(&self, frame: PhysFrame) -> bool {
        frame.val() >= self.slow_tier_base
    }
}

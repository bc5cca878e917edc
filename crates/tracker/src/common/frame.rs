//! Physical and Virtual Frame number types.
//!
//! This module defines strong types for the two frame-number spaces the tracker
//! deals with, to prevent accidental mixing. It provides the following:
//! 1. **Type Safety:** Distinguishes physical from virtual frame numbers at compile time.
//! 2. **Frame Arithmetic:** Helpers for deriving populated frame ranges.
//! 3. **Registry Keys:** Both types are `Ord` so they can key the registry's ordered tables.

use serde::Serialize;

/// A physical frame number: a location in real (possibly tiered) memory.
///
/// Physical frame numbers identify populated pages in the simulated address
/// space and are the authoritative key for a page's statistics once the
/// virtual-to-physical mapping has resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PhysFrame(pub u64);

/// A virtual frame number: the program-visible page identity.
///
/// Virtual frame numbers are only unique per requesting core, so the tracker
/// always pairs them with a [`CoreId`] when used as a lookup key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VirtFrame(pub u64);

/// Identifier of the core that issued a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CoreId(pub usize);

impl PhysFrame {
    /// Creates a new physical frame number from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(frame: u64) -> Self {
        Self(frame)
    }

    /// Returns the raw 64-bit frame number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns the frame `offset` pages above this one.
    #[inline]
    pub const fn offset(self, offset: u64) -> Self {
        Self(self.0 + offset)
    }
}

impl VirtFrame {
    /// Creates a new virtual frame number from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(frame: u64) -> Self {
        Self(frame)
    }

    /// Returns the raw 64-bit frame number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl CoreId {
    /// Creates a new core identifier.
    #[inline(always)]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the raw core index.
    #[inline(always)]
    pub const fn val(self) -> usize {
        self.0
    }
}

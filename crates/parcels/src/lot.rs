use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{BLOCK_DEPTH, BLOCK_MIN_WIDTH};
use crate::grid::ZoneValue;
use crate::params::ParcelParams;

/// Width × depth of a lot, in cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct LotSize {
    pub width: u8,
    pub depth: u8,
}

impl LotSize {
    pub const fn new(width: u8, depth: u8) -> Self {
        Self { width, depth }
    }

    /// Build a size only if it lies inside the configured range.
    pub fn checked(width: u8, depth: u8, params: &ParcelParams) -> Option<Self> {
        let size = Self::new(width, depth);
        params.contains(size).then_some(size)
    }

    pub fn cell_count(self) -> usize {
        self.width as usize * self.depth as usize
    }
}

impl fmt::Display for LotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.depth)
    }
}

/// Padded footprint of the block a lot sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockFootprint {
    pub width: u8,
    pub depth: u8,
}

impl BlockFootprint {
    /// Width is floored at [`BLOCK_MIN_WIDTH`]; depth is always
    /// [`BLOCK_DEPTH`] whatever the lot's own depth.
    pub fn for_lot(lot: LotSize) -> Self {
        Self {
            width: lot.width.max(BLOCK_MIN_WIDTH),
            depth: BLOCK_DEPTH,
        }
    }
}

/// A live lot placed in the world.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parcel {
    pub size: LotSize,
}

/// Single-byte state bits stored on a lot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ParcelFlags(pub u8);

impl ParcelFlags {
    /// Every cell in the lot's window carries the same zone.
    pub const UNIFORM_ZONING: u8 = 1 << 0;
    /// The record belongs to a placement placeholder.
    pub const PLACEHOLDER: u8 = 1 << 1;
    /// The lot was created by this crate, not by the host's own initializer.
    pub const MANAGED: u8 = 1 << 2;

    #[inline]
    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    #[inline]
    pub fn set(&mut self, bit: u8, on: bool) {
        if on {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }
}

/// Per-lot record: pre-zone, road attachment, occupying building and state bits.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct ParcelRecord {
    pub zone: ZoneValue,
    pub road_edge: Option<Entity>,
    pub curve_position: f32,
    pub building: Option<Entity>,
    pub flags: ParcelFlags,
}

impl ParcelRecord {
    pub fn is_uniformly_zoned(&self) -> bool {
        self.flags.contains(ParcelFlags::UNIFORM_ZONING)
    }

    pub fn is_placeholder(&self) -> bool {
        self.flags.contains(ParcelFlags::PLACEHOLDER)
    }
}

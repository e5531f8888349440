use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lot::{BlockFootprint, LotSize};

/// Host-defined zone identifier stored in block cells and on lot records.
///
/// `NONE` marks a cell whose zone was never assigned (an invalid state the
/// classifier heals by reading it as the configured unzoned value).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
pub struct ZoneValue(pub u16);

impl ZoneValue {
    pub const NONE: ZoneValue = ZoneValue(0);
    pub const UNZONED: ZoneValue = ZoneValue(1);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Row-major zone cells covering a block footprint.
///
/// The block may be wider or deeper than the lot standing on it; readers
/// that care about the lot only look at the lot's own window.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCells {
    pub cells: Vec<ZoneValue>,
    pub width: usize,
    pub depth: usize,
}

impl BlockCells {
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            cells: vec![ZoneValue::NONE; width * depth],
            width,
            depth,
        }
    }

    /// Empty grid sized to the padded block under `lot`.
    pub fn for_lot(lot: LotSize) -> Self {
        let block = BlockFootprint::for_lot(lot);
        Self::new(block.width as usize, block.depth as usize)
    }

    pub fn filled(width: usize, depth: usize, zone: ZoneValue) -> Self {
        Self {
            cells: vec![zone; width * depth],
            width,
            depth,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.depth
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> ZoneValue {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, zone: ZoneValue) {
        let idx = self.index(x, y);
        self.cells[idx] = zone;
    }

    /// Whether the grid is large enough to hold the lot's window.
    pub fn covers(&self, lot: LotSize) -> bool {
        lot.width as usize <= self.width && lot.depth as usize <= self.depth
    }
}

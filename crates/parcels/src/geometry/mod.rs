//! Pure lot geometry.
//!
//! Everything here is a deterministic function of a [`LotSize`] and the two
//! constants [`CELL_SIZE`] and [`LOT_HEIGHT`]. Lots are centered on their
//! local origin with the front edge facing −Z.

mod nodes;

#[cfg(test)]
mod tests;

pub use nodes::{AccessNode, Corner, NODE_MULTIPLIERS};

use bevy::prelude::*;

use crate::config::{CELL_SIZE, LOT_HEIGHT};
use crate::lot::{BlockFootprint, LotSize};

/// Axis-aligned box in lot-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParcelBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ParcelBounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// World-space horizontal quad of a placed lot, cached on the entity.
/// Corner order follows [`Corner::ALL`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ParcelFootprint(pub [Vec2; 4]);

pub fn lot_size_vector(lot: LotSize) -> Vec3 {
    Vec3::new(
        lot.width as f32 * CELL_SIZE,
        LOT_HEIGHT,
        lot.depth as f32 * CELL_SIZE,
    )
}

pub fn block_size_vector(lot: LotSize) -> Vec3 {
    let block = BlockFootprint::for_lot(lot);
    Vec3::new(
        block.width as f32 * CELL_SIZE,
        LOT_HEIGHT,
        block.depth as f32 * CELL_SIZE,
    )
}

pub fn bounds(size: Vec3) -> ParcelBounds {
    let half = size * 0.5;
    ParcelBounds {
        min: -half,
        max: half,
    }
}

/// Bounds of the padded block, shifted so it shares the lot's front and left
/// edges instead of its center.
pub fn block_bounds(lot: LotSize) -> ParcelBounds {
    let lot_size = lot_size_vector(lot);
    let block_size = block_size_vector(lot);
    let shift = (block_size - lot_size) * 0.5;
    bounds(block_size).translated(Vec3::new(shift.x, 0.0, shift.z))
}

pub fn corner_nodes(lot: LotSize) -> [Vec3; 4] {
    let size = lot_size_vector(lot);
    Corner::ALL.map(|corner| corner.multiplier() * size)
}

pub fn access_node(lot: LotSize, which: AccessNode) -> Vec3 {
    which.multiplier() * lot_size_vector(lot)
}

pub fn access_nodes(lot: LotSize) -> [Vec3; 4] {
    let size = lot_size_vector(lot);
    AccessNode::ALL.map(|node| node.multiplier() * size)
}

/// Rotation + translation of a live transform. Scale is ignored: lot
/// dimensions come from the size alone.
pub fn parcel_matrix(transform: &Transform) -> Mat4 {
    Mat4::from_rotation_translation(transform.rotation, transform.translation)
}

/// Horizontal (X, Z) projection of the lot's corners in world space, in
/// [`Corner::ALL`] order.
pub fn world_corners(transform: &Transform, lot: LotSize) -> [Vec2; 4] {
    let matrix = parcel_matrix(transform);
    corner_nodes(lot).map(|local| {
        let world = matrix.transform_point3(local);
        Vec2::new(world.x, world.z)
    })
}

/// All derived geometry of one lot size, bundled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParcelGeometry {
    pub size: Vec3,
    pub bounds: ParcelBounds,
    pub block_bounds: ParcelBounds,
    pub corners: [Vec3; 4],
    pub access_nodes: [Vec3; 4],
}

impl ParcelGeometry {
    pub fn new(lot: LotSize) -> Self {
        let size = lot_size_vector(lot);
        Self {
            size,
            bounds: bounds(size),
            block_bounds: block_bounds(lot),
            corners: corner_nodes(lot),
            access_nodes: access_nodes(lot),
        }
    }
}

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::*;
use crate::config::{BLOCK_DEPTH, CELL_SIZE, LOT_HEIGHT};
use crate::params::ParcelParams;

fn all_sizes() -> Vec<LotSize> {
    ParcelParams::default().sizes().collect()
}

fn assert_vec2_near(a: Vec2, b: Vec2) {
    assert!(a.abs_diff_eq(b, 1e-4), "expected {b:?}, got {a:?}");
}

#[test]
fn test_size_vector_scales_by_cell_size() {
    let size = lot_size_vector(LotSize::new(3, 4));
    assert_eq!(size, Vec3::new(3.0 * CELL_SIZE, LOT_HEIGHT, 4.0 * CELL_SIZE));
}

#[test]
fn test_bounds_centered_with_exact_half_extents() {
    for lot in all_sizes() {
        let b = bounds(lot_size_vector(lot));
        assert_eq!(b.center(), Vec3::ZERO, "{lot} not centered");
        assert_eq!(
            b.half_extents(),
            Vec3::new(
                lot.width as f32 * CELL_SIZE / 2.0,
                LOT_HEIGHT / 2.0,
                lot.depth as f32 * CELL_SIZE / 2.0,
            ),
            "{lot} half extents"
        );
    }
}

#[test]
fn test_corners_form_rectangle_of_lot_size() {
    for lot in all_sizes() {
        let size = lot_size_vector(lot);
        let [fr, fl, bl, br] = corner_nodes(lot);
        // Edges
        assert_eq!(fr.distance(fl), size.x, "{lot} front edge");
        assert_eq!(bl.distance(br), size.x, "{lot} back edge");
        assert_eq!(fl.distance(bl), size.z, "{lot} left edge");
        assert_eq!(br.distance(fr), size.z, "{lot} right edge");
        // Diagonals
        let diagonal = (size.x * size.x + size.z * size.z).sqrt();
        assert!((fr.distance(bl) - diagonal).abs() < 1e-4);
        assert!((fl.distance(br) - diagonal).abs() < 1e-4);
    }
}

#[test]
fn test_corner_order_starts_front_right() {
    let [fr, fl, bl, br] = corner_nodes(LotSize::new(2, 4));
    assert!(fr.x > 0.0 && fr.z < 0.0);
    assert!(fl.x < 0.0 && fl.z < 0.0);
    assert!(bl.x < 0.0 && bl.z > 0.0);
    assert!(br.x > 0.0 && br.z > 0.0);
}

#[test]
fn test_access_nodes_are_edge_midpoints() {
    for lot in all_sizes() {
        let corners = corner_nodes(lot);
        for node in AccessNode::ALL {
            let (a, b) = node.edge();
            let midpoint = (corners[a as usize] + corners[b as usize]) * 0.5;
            assert_eq!(access_node(lot, node), midpoint, "{lot} {node:?}");
        }
    }
}

#[test]
fn test_access_nodes_match_single_lookups() {
    let lot = LotSize::new(5, 3);
    let nodes = access_nodes(lot);
    for (i, node) in AccessNode::ALL.iter().enumerate() {
        assert_eq!(nodes[i], access_node(lot, *node));
    }
}

#[test]
fn test_multiplier_table_in_unit_range() {
    for m in NODE_MULTIPLIERS {
        for c in m.to_array() {
            assert!((-0.5..=0.5).contains(&c));
        }
    }
}

#[test]
fn test_block_bounds_share_front_and_left_edges() {
    for lot in all_sizes() {
        let lot_bounds = bounds(lot_size_vector(lot));
        let block = block_bounds(lot);
        assert_eq!(block.min.x, lot_bounds.min.x, "{lot} left edge");
        assert_eq!(block.min.z, lot_bounds.min.z, "{lot} front edge");
        assert_eq!(block.max.z - block.min.z, BLOCK_DEPTH as f32 * CELL_SIZE);
        assert_eq!(block.min.y, lot_bounds.min.y);
        assert_eq!(block.max.y, lot_bounds.max.y);
    }
}

#[test]
fn test_narrow_lot_block_is_two_cells_wide() {
    let block = block_bounds(LotSize::new(1, 2));
    assert_eq!(block.max.x - block.min.x, 2.0 * CELL_SIZE);
}

#[test]
fn test_world_corners_identity_transform() {
    let lot = LotSize::new(2, 3);
    let quad = world_corners(&Transform::IDENTITY, lot);
    for (i, corner) in corner_nodes(lot).iter().enumerate() {
        assert_vec2_near(quad[i], Vec2::new(corner.x, corner.z));
    }
}

#[test]
fn test_world_corners_translated() {
    let lot = LotSize::new(2, 2);
    let transform = Transform::from_xyz(100.0, 7.0, -50.0);
    let quad = world_corners(&transform, lot);
    assert_vec2_near(quad[0], Vec2::new(100.0 + CELL_SIZE, -50.0 - CELL_SIZE));
    assert_vec2_near(quad[2], Vec2::new(100.0 - CELL_SIZE, -50.0 + CELL_SIZE));
}

#[test]
fn test_world_corners_rotated_quarter_turn() {
    // Quarter turn about +Y maps local (x, z) to (z, -x).
    let lot = LotSize::new(2, 4);
    let transform = Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2));
    let quad = world_corners(&transform, lot);
    let [fr, ..] = corner_nodes(lot);
    assert_vec2_near(quad[0], Vec2::new(fr.z, -fr.x));
}

#[test]
fn test_world_corners_ignore_scale() {
    let lot = LotSize::new(3, 3);
    let scaled = Transform::from_xyz(1.0, 0.0, 1.0).with_scale(Vec3::splat(4.0));
    let plain = Transform::from_xyz(1.0, 0.0, 1.0);
    assert_eq!(world_corners(&scaled, lot), world_corners(&plain, lot));
}

#[test]
fn test_geometry_is_deterministic() {
    for lot in all_sizes() {
        assert_eq!(ParcelGeometry::new(lot), ParcelGeometry::new(lot));
    }
}

use bevy::prelude::*;

/// Lot corners, clockwise from the front-right corner when viewed from
/// above with the front edge (−Z) at the bottom of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    FrontRight,
    FrontLeft,
    BackLeft,
    BackRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::FrontRight,
        Corner::FrontLeft,
        Corner::BackLeft,
        Corner::BackRight,
    ];

    #[inline]
    pub fn multiplier(self) -> Vec3 {
        NODE_MULTIPLIERS[self as usize]
    }
}

/// Edge midpoints where roads, paths and neighbouring lots attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessNode {
    Front,
    Left,
    Back,
    Right,
}

impl AccessNode {
    pub const ALL: [AccessNode; 4] = [
        AccessNode::Front,
        AccessNode::Left,
        AccessNode::Back,
        AccessNode::Right,
    ];

    #[inline]
    pub fn multiplier(self) -> Vec3 {
        NODE_MULTIPLIERS[4 + self as usize]
    }

    /// The two corners bounding this node's edge.
    pub fn edge(self) -> (Corner, Corner) {
        match self {
            AccessNode::Front => (Corner::FrontRight, Corner::FrontLeft),
            AccessNode::Left => (Corner::FrontLeft, Corner::BackLeft),
            AccessNode::Back => (Corner::BackLeft, Corner::BackRight),
            AccessNode::Right => (Corner::BackRight, Corner::FrontRight),
        }
    }
}

/// Node position = multiplier × lot size. Corners first, in [`Corner`]
/// order, then edge midpoints in [`AccessNode`] order. Nodes sit on the
/// lot's mid-height plane.
pub const NODE_MULTIPLIERS: [Vec3; 8] = [
    Vec3::new(0.5, 0.0, -0.5),
    Vec3::new(-0.5, 0.0, -0.5),
    Vec3::new(-0.5, 0.0, 0.5),
    Vec3::new(0.5, 0.0, 0.5),
    Vec3::new(0.0, 0.0, -0.5),
    Vec3::new(-0.5, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 0.5),
    Vec3::new(0.5, 0.0, 0.0),
];

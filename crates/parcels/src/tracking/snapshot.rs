use bevy::prelude::*;

use crate::config::{TRANSFORM_ABS_TOLERANCE, TRANSFORM_REL_TOLERANCE};

/// Last-observed transform of a tracked entity.
///
/// Created the first time the entity qualifies for tracking and written only
/// by the change detector afterwards.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CachedTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CachedTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Result of comparing a snapshot with the live transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Unchanged,
    /// The snapshot was overwritten with the live value.
    Changed,
}

impl CachedTransform {
    pub const IDENTITY: CachedTransform = CachedTransform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            rotation: transform.rotation,
        }
    }

    /// Component-wise approximate equality of position and rotation.
    pub fn matches(&self, transform: &Transform) -> bool {
        let pos = self.position.to_array();
        let live_pos = transform.translation.to_array();
        let rot = self.rotation.to_array();
        let live_rot = transform.rotation.to_array();

        pos.iter().zip(live_pos.iter()).all(|(a, b)| approx_eq(*a, *b))
            && rot.iter().zip(live_rot.iter()).all(|(a, b)| approx_eq(*a, *b))
    }

    /// Compare against the live transform, adopting it on divergence.
    pub fn observe(&mut self, transform: &Transform) -> Observation {
        if self.matches(transform) {
            Observation::Unchanged
        } else {
            *self = Self::from_transform(transform);
            Observation::Changed
        }
    }

    /// Every component finite and every position component within
    /// `±world_bound`.
    pub fn is_valid(&self, world_bound: f32) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && self.position.abs().max_element() <= world_bound
    }

    /// The snapshot itself if valid, otherwise origin/identity. Never repairs
    /// individual components.
    pub fn sanitized(self, world_bound: f32) -> Self {
        if self.is_valid(world_bound) {
            self
        } else {
            Self::IDENTITY
        }
    }
}

/// Single-precision closeness: `|a - b|` within a relative tolerance of the
/// larger magnitude, floored at a small absolute tolerance.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    let tolerance =
        (TRANSFORM_REL_TOLERANCE * a.abs().max(b.abs())).max(TRANSFORM_ABS_TOLERANCE);
    (a - b).abs() <= tolerance
}

// ---------------------------------------------------------------------------
// Payload records and their conversions to and from live components
// ---------------------------------------------------------------------------

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use parcels::grid::ZoneValue;
use parcels::lot::{ParcelFlags, ParcelRecord};
use parcels::tracking::CachedTransform;

use crate::codec::PAYLOAD_VERSION;

/// One lot record. Entity references are stored as `Entity::to_bits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ParcelRecordPayload {
    pub zone: u64,
    pub road_edge: Option<u64>,
    pub curve_position: f32,
    pub building: Option<u64>,
    pub state: u8,
}

/// One cached-transform snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct TransformPayload {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
}

/// Every placed lot, with its snapshot if it was being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ParcelSavePayload {
    pub version: u8,
    pub parcels: Vec<(ParcelRecordPayload, Option<TransformPayload>)>,
}

impl Default for ParcelSavePayload {
    fn default() -> Self {
        Self {
            version: PAYLOAD_VERSION,
            parcels: Vec::new(),
        }
    }
}

impl From<&ParcelRecord> for ParcelRecordPayload {
    fn from(record: &ParcelRecord) -> Self {
        Self {
            zone: u64::from(record.zone.0),
            road_edge: record.road_edge.map(Entity::to_bits),
            curve_position: record.curve_position,
            building: record.building.map(Entity::to_bits),
            state: record.flags.0,
        }
    }
}

impl ParcelRecordPayload {
    /// Rebuild the live record. Unrepresentable zones and entity bits are
    /// dropped rather than rejected.
    pub fn to_record(&self) -> ParcelRecord {
        let zone = u16::try_from(self.zone).map(ZoneValue).unwrap_or_else(|_| {
            debug!("Parcel payload: zone {} out of range, cleared", self.zone);
            ZoneValue::NONE
        });
        ParcelRecord {
            zone,
            road_edge: self.road_edge.and_then(entity_from_bits),
            curve_position: self.curve_position,
            building: self.building.and_then(entity_from_bits),
            flags: ParcelFlags(self.state),
        }
    }
}

fn entity_from_bits(bits: u64) -> Option<Entity> {
    Entity::try_from_bits(bits)
        .inspect_err(|_| debug!("Parcel payload: invalid entity bits {bits:#x}, dropped"))
        .ok()
}

impl From<&CachedTransform> for TransformPayload {
    fn from(snapshot: &CachedTransform) -> Self {
        Self {
            position: snapshot.position.to_array(),
            rotation: snapshot.rotation.to_array(),
        }
    }
}

impl TransformPayload {
    /// The stored snapshot, or origin/identity if any component is
    /// non-finite or the position leaves `±world_bound`.
    pub fn to_snapshot(self, world_bound: f32) -> CachedTransform {
        let snapshot = CachedTransform {
            position: Vec3::from_array(self.position),
            rotation: Quat::from_array(self.rotation),
        };
        if !snapshot.is_valid(world_bound) {
            debug!("Parcel payload: snapshot {:?} out of range, reset", self);
        }
        snapshot.sanitized(world_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcels::config::DEFAULT_WORLD_BOUND;

    #[test]
    fn test_in_bounds_snapshot_is_exact() {
        let payload = TransformPayload {
            position: [12.345_678, -0.000_123, 99_999.99],
            rotation: [0.1, 0.2, 0.3, 0.927_361_85],
        };
        let snapshot = payload.to_snapshot(DEFAULT_WORLD_BOUND);
        assert_eq!(TransformPayload::from(&snapshot), payload);
    }

    #[test]
    fn test_out_of_range_position_resets_whole_snapshot() {
        let payload = TransformPayload {
            position: [1.0, 2.0, 100_001.0],
            rotation: [0.0, 0.707, 0.0, 0.707],
        };
        assert_eq!(
            payload.to_snapshot(DEFAULT_WORLD_BOUND),
            CachedTransform::IDENTITY
        );
    }

    #[test]
    fn test_non_finite_rotation_resets_whole_snapshot() {
        let payload = TransformPayload {
            position: [5.0, 0.0, 5.0],
            rotation: [f32::NAN, 0.0, 0.0, 1.0],
        };
        assert_eq!(
            payload.to_snapshot(DEFAULT_WORLD_BOUND),
            CachedTransform::IDENTITY
        );
    }

    #[test]
    fn test_bound_is_inclusive() {
        let payload = TransformPayload {
            position: [-DEFAULT_WORLD_BOUND, 0.0, DEFAULT_WORLD_BOUND],
            rotation: [0.0, 0.0, 0.0, 1.0],
        };
        assert_eq!(
            TransformPayload::from(&payload.to_snapshot(DEFAULT_WORLD_BOUND)),
            payload
        );
    }

    #[test]
    fn test_record_round_trip_keeps_references_and_bits() {
        let mut flags = ParcelFlags::default();
        flags.set(ParcelFlags::UNIFORM_ZONING, true);
        flags.set(ParcelFlags::MANAGED, true);
        let record = ParcelRecord {
            zone: ZoneValue(7),
            road_edge: Some(Entity::from_raw(42)),
            curve_position: 0.625,
            building: None,
            flags,
        };
        assert_eq!(ParcelRecordPayload::from(&record).to_record(), record);
    }

    #[test]
    fn test_oversized_zone_is_cleared() {
        let payload = ParcelRecordPayload {
            zone: u64::from(u16::MAX) + 1,
            road_edge: None,
            curve_position: 0.0,
            building: None,
            state: 0,
        };
        assert_eq!(payload.to_record().zone, ZoneValue::NONE);
    }
}

// ---------------------------------------------------------------------------
// Capture placed lots from the ECS world and restore them from a payload
// ---------------------------------------------------------------------------

use bevy::prelude::*;

use parcels::lot::{ParcelFlags, ParcelRecord};
use parcels::tracking::{CachedTransform, Watched};
use parcels::variants::{ManagedParcel, ParcelVariant};

use crate::payload::{ParcelRecordPayload, ParcelSavePayload, TransformPayload};

/// Snapshot every placed lot, in entity order.
///
/// Variant entities are skipped; they are regenerated on startup.
pub fn capture_parcels(world: &mut World) -> ParcelSavePayload {
    let mut lots: Vec<(Entity, ParcelRecordPayload, Option<TransformPayload>)> = world
        .query_filtered::<(Entity, &ParcelRecord, Option<&CachedTransform>), Without<ParcelVariant>>()
        .iter(world)
        .map(|(entity, record, snapshot)| {
            (
                entity,
                ParcelRecordPayload::from(record),
                snapshot.map(TransformPayload::from),
            )
        })
        .collect();
    lots.sort_by_key(|(entity, _, _)| *entity);

    ParcelSavePayload {
        parcels: lots
            .into_iter()
            .map(|(_, record, snapshot)| (record, snapshot))
            .collect(),
        ..Default::default()
    }
}

/// Spawn one entity per payload entry and return them in payload order.
///
/// Lots saved with the managed state bit get `ManagedParcel` back, so the
/// host's default initializer keeps skipping them. Entries with a snapshot
/// come back watched, with the live transform set to
/// the (validated) snapshot so the first tick after loading reports nothing.
/// Snapshots that fail validation against `world_bound` are reset to
/// origin/identity as a whole.
pub fn restore_parcels(
    world: &mut World,
    payload: &ParcelSavePayload,
    world_bound: f32,
) -> Vec<Entity> {
    let restored: Vec<Entity> = payload
        .parcels
        .iter()
        .map(|(record, snapshot)| {
            let record = record.to_record();
            let managed = record.flags.contains(ParcelFlags::MANAGED);
            let mut entity = world.spawn(record);
            if managed {
                entity.insert(ManagedParcel);
            }
            if let Some(snapshot) = snapshot {
                let snapshot = snapshot.to_snapshot(world_bound);
                entity.insert((
                    Watched,
                    Transform::from_translation(snapshot.position)
                        .with_rotation(snapshot.rotation),
                    snapshot,
                ));
            }
            entity.id()
        })
        .collect();

    info!("Restored {} parcels", restored.len());
    restored
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcels::config::DEFAULT_WORLD_BOUND;
    use parcels::grid::ZoneValue;
    use parcels::lot::LotSize;
    use parcels::variants::{is_host_managed, HostInitFilter, VariantKind};

    use crate::codec::{decode_payload, encode_payload};

    fn record(zone: u16) -> ParcelRecord {
        ParcelRecord {
            zone: ZoneValue(zone),
            curve_position: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_capture_skips_variants_and_keeps_snapshots() {
        let mut world = World::new();
        world.spawn((
            record(4),
            CachedTransform {
                position: Vec3::new(1.0, 2.0, 3.0),
                rotation: Quat::IDENTITY,
            },
        ));
        world.spawn(record(5));
        world.spawn((
            record(6),
            ParcelVariant {
                kind: VariantKind::Real,
                size: LotSize::new(2, 2),
            },
        ));

        let payload = capture_parcels(&mut world);

        assert_eq!(payload.parcels.len(), 2);
        assert_eq!(payload.parcels[0].0.zone, 4);
        assert_eq!(
            payload.parcels[0].1.map(|t| t.position),
            Some([1.0, 2.0, 3.0])
        );
        assert_eq!(payload.parcels[1].0.zone, 5);
        assert!(payload.parcels[1].1.is_none());
    }

    #[test]
    fn test_capture_encode_restore_is_exact() {
        let mut source = World::new();
        let mut flags = ParcelFlags::default();
        flags.set(ParcelFlags::UNIFORM_ZONING, true);
        let original = ParcelRecord {
            flags,
            ..record(9)
        };
        let snapshot = CachedTransform {
            position: Vec3::new(-512.25, 3.5, 77.125),
            rotation: Quat::from_rotation_y(0.3),
        };
        source.spawn((original.clone(), snapshot));

        let bytes = encode_payload(&capture_parcels(&mut source)).expect("encode");
        let payload = decode_payload(&bytes).expect("decode");

        let mut target = World::new();
        let restored = restore_parcels(&mut target, &payload, DEFAULT_WORLD_BOUND);

        assert_eq!(restored.len(), 1);
        let e = restored[0];
        assert_eq!(target.get::<ParcelRecord>(e), Some(&original));
        assert_eq!(target.get::<CachedTransform>(e), Some(&snapshot));
        assert!(target.get::<Watched>(e).is_some());
        assert_eq!(
            target.get::<Transform>(e).map(|t| t.translation),
            Some(snapshot.position)
        );
    }

    #[test]
    fn test_corrupt_snapshot_restores_at_identity() {
        let payload = ParcelSavePayload {
            parcels: vec![(
                ParcelRecordPayload::from(&record(2)),
                Some(TransformPayload {
                    position: [0.0, f32::INFINITY, 0.0],
                    rotation: [0.0, 0.0, 0.0, 1.0],
                }),
            )],
            ..Default::default()
        };

        let mut world = World::new();
        let restored = restore_parcels(&mut world, &payload, DEFAULT_WORLD_BOUND);

        assert_eq!(
            world.get::<CachedTransform>(restored[0]),
            Some(&CachedTransform::IDENTITY)
        );
        assert_eq!(
            world.get::<Transform>(restored[0]).map(|t| t.translation),
            Some(Vec3::ZERO)
        );
    }

    #[test]
    fn test_untracked_entry_restores_without_tracking() {
        let payload = ParcelSavePayload {
            parcels: vec![(ParcelRecordPayload::from(&record(3)), None)],
            ..Default::default()
        };

        let mut world = World::new();
        let restored = restore_parcels(&mut world, &payload, DEFAULT_WORLD_BOUND);

        assert!(world.get::<Watched>(restored[0]).is_none());
        assert!(world.get::<CachedTransform>(restored[0]).is_none());
    }

    #[test]
    fn test_managed_lot_stays_hidden_from_host_initializer() {
        let mut flags = ParcelFlags::default();
        flags.set(ParcelFlags::MANAGED, true);
        let mut source = World::new();
        source.spawn((
            ParcelRecord {
                flags,
                ..record(2)
            },
            ManagedParcel,
        ));
        source.spawn(record(3));

        let payload = capture_parcels(&mut source);
        let mut target = World::new();
        let restored = restore_parcels(&mut target, &payload, DEFAULT_WORLD_BOUND);
        let (managed, host) = (restored[0], restored[1]);

        assert!(target.get::<ManagedParcel>(managed).is_some());
        assert!(is_host_managed(managed, &target));
        assert!(!is_host_managed(host, &target));

        let visible: Vec<Entity> = target
            .query_filtered::<Entity, HostInitFilter>()
            .iter(&target)
            .collect();
        assert!(!visible.contains(&managed));
        assert!(visible.contains(&host));
    }
}

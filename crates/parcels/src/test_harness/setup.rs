//! Builder methods for spawning tracked entities and lots in integration tests.

use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;

use crate::grid::{BlockCells, ZoneValue};
use crate::lot::LotSize;
use crate::tracking::Watched;
use crate::variants::{place_parcel, VariantContext, VariantKind};

use super::TestWorld;

impl TestWorld {
    // -----------------------------------------------------------------------
    // Spawning
    // -----------------------------------------------------------------------

    /// Spawn a bare watched entity at `transform`.
    pub fn spawn_watched(&mut self, transform: Transform) -> Entity {
        self.app.world_mut().spawn((Watched, transform)).id()
    }

    /// Spawn `n` watched entities laid out on a line along +X.
    pub fn spawn_watched_row(&mut self, n: usize) -> Vec<Entity> {
        (0..n)
            .map(|i| self.spawn_watched(Transform::from_xyz(i as f32 * 10.0, 0.0, 0.0)))
            .collect()
    }

    /// Place a live lot from the generated variant of `kind` and `size`.
    ///
    /// Panics if that variant was not generated.
    pub fn place(&mut self, kind: VariantKind, size: LotSize, transform: Transform) -> Entity {
        let world = self.app.world_mut();
        let variant = world
            .resource::<VariantContext>()
            .cache()
            .lookup_identity(&kind.identity(size))
            .unwrap_or_else(|| panic!("no generated variant for {kind:?} {size}"));

        let mut queue = CommandQueue::default();
        let placed = {
            let mut commands = Commands::new(&mut queue, world);
            let cache = world.resource::<VariantContext>().cache();
            place_parcel(&mut commands, cache, variant, transform)
        };
        queue.apply(world);
        placed.expect("variant is registered")
    }

    /// Fill the lot's block cells with a single zone.
    pub fn zone_lot(&mut self, lot: Entity, zone: ZoneValue) {
        let mut cells = self
            .app
            .world_mut()
            .get_mut::<BlockCells>(lot)
            .expect("lot has block cells");
        cells.cells.fill(zone);
    }

    /// Set one block cell of a lot.
    pub fn zone_cell(&mut self, lot: Entity, x: usize, y: usize, zone: ZoneValue) {
        let mut cells = self
            .app
            .world_mut()
            .get_mut::<BlockCells>(lot)
            .expect("lot has block cells");
        cells.set(x, y, zone);
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    pub fn set_translation(&mut self, entity: Entity, translation: Vec3) {
        if let Some(mut transform) = self.app.world_mut().get_mut::<Transform>(entity) {
            transform.translation = translation;
        }
    }

    pub fn set_rotation(&mut self, entity: Entity, rotation: Quat) {
        if let Some(mut transform) = self.app.world_mut().get_mut::<Transform>(entity) {
            transform.rotation = rotation;
        }
    }

    pub fn insert<B: Bundle>(&mut self, entity: Entity, bundle: B) {
        self.app.world_mut().entity_mut(entity).insert(bundle);
    }

    pub fn remove<B: Bundle>(&mut self, entity: Entity) {
        self.app.world_mut().entity_mut(entity).remove::<B>();
    }
}

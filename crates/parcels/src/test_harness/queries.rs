//! Query and tick methods for `TestWorld`.

use bevy::prelude::*;

use crate::geometry::ParcelFootprint;
use crate::lot::{LotSize, ParcelRecord};
use crate::tracking::{CachedTransform, TransformChanged};
use crate::variants::{VariantCache, VariantContext, VariantKind};

use super::{ChangeLog, TestWorld};

impl TestWorld {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N ticks by executing the `FixedUpdate` schedule directly, so the
    /// tick count does not depend on virtual time.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
            std::thread::yield_now();
        }
    }

    /// Run a full app update (Startup on the first call, then Main).
    pub fn update(&mut self) {
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Get any resource by type.
    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn variants(&self) -> &VariantCache {
        self.app.world().resource::<VariantContext>().cache()
    }

    pub fn change_log(&self) -> &ChangeLog {
        self.app.world().resource::<ChangeLog>()
    }

    /// Entities seen with a `TransformChanged` marker during the last tick.
    pub fn changed_last_tick(&self) -> Vec<Entity> {
        let log = self.change_log();
        log.in_tick(log.tick)
    }

    /// Handle of the generated variant of `kind` and `size`, if any.
    pub fn variant(&self, kind: VariantKind, size: LotSize) -> Option<Entity> {
        self.variants().lookup_identity(&kind.identity(size))
    }

    pub fn snapshot(&self, entity: Entity) -> Option<CachedTransform> {
        self.app.world().get::<CachedTransform>(entity).copied()
    }

    pub fn record(&self, entity: Entity) -> Option<&ParcelRecord> {
        self.app.world().get::<ParcelRecord>(entity)
    }

    pub fn footprint(&self, entity: Entity) -> Option<[Vec2; 4]> {
        self.app
            .world()
            .get::<ParcelFootprint>(entity)
            .map(|footprint| footprint.0)
    }

    /// Number of entities carrying a marker right now. Between ticks this is
    /// always zero, since markers are cleared at the end of every tick.
    pub fn pending_markers(&mut self) -> usize {
        let world = self.app.world_mut();
        world
            .query_filtered::<Entity, With<TransformChanged>>()
            .iter(world)
            .count()
    }
}

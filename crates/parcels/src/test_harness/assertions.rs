//! Assertion helpers for `TestWorld` integration tests.

use bevy::prelude::*;

use crate::grid::ZoneValue;

use super::TestWorld;

impl TestWorld {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert `entity` was reported changed exactly `n` times so far.
    pub fn assert_change_count(&self, entity: Entity, n: usize) {
        let count = self.change_log().count_for(entity);
        assert_eq!(
            count, n,
            "Expected {n} change reports for {entity:?}, got {count}"
        );
    }

    /// Assert the last tick reported nothing.
    pub fn assert_quiet_tick(&self) {
        let changed = self.changed_last_tick();
        assert!(
            changed.is_empty(),
            "Expected no changes in the last tick, got {changed:?}"
        );
    }

    pub fn assert_has_snapshot(&self, entity: Entity) {
        assert!(
            self.snapshot(entity).is_some(),
            "Expected {entity:?} to have a cached transform"
        );
    }

    pub fn assert_no_snapshot(&self, entity: Entity) {
        assert!(
            self.snapshot(entity).is_none(),
            "Expected {entity:?} to have no cached transform"
        );
    }

    /// Assert a lot's derived zone and uniformity bit.
    pub fn assert_zoning(&self, lot: Entity, zone: ZoneValue, uniform: bool) {
        let record = self
            .record(lot)
            .unwrap_or_else(|| panic!("{lot:?} has no parcel record"));
        assert_eq!(record.zone, zone, "Unexpected zone on {lot:?}");
        assert_eq!(
            record.is_uniformly_zoned(),
            uniform,
            "Unexpected uniform-zoning bit on {lot:?}"
        );
    }
}

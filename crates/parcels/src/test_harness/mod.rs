//! # TestWorld: headless integration test harness for the parcel core
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `ParcelsPlugin`
//! for running integration tests without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::config::{BLOCK_MIN_WIDTH, MAX_LOT_WIDTH};
use crate::params::ParcelParams;
use crate::parcel_sets::ParcelSet;
use crate::tracking::TransformChanged;
use crate::variants::BlockTemplates;
use crate::ParcelsPlugin;

/// Every `TransformChanged` marker seen by the React phase, with the tick it
/// was seen on. Stands in for a dependent subsystem.
#[derive(Resource, Default, Debug)]
pub struct ChangeLog {
    pub tick: u64,
    pub seen: Vec<(u64, Entity)>,
}

impl ChangeLog {
    pub fn count_for(&self, entity: Entity) -> usize {
        self.seen.iter().filter(|(_, e)| *e == entity).count()
    }

    pub fn in_tick(&self, tick: u64) -> Vec<Entity> {
        self.seen
            .iter()
            .filter(|(t, _)| *t == tick)
            .map(|(_, e)| *e)
            .collect()
    }
}

fn record_changes(mut log: ResMut<ChangeLog>, changed: Query<Entity, With<TransformChanged>>) {
    log.tick += 1;
    let tick = log.tick;
    for entity in &changed {
        log.seen.push((tick, entity));
    }
}

/// A headless Bevy App wrapping `ParcelsPlugin` for integration testing.
///
/// Use constructors to pick parameters and templates, then call `tick()` to
/// advance the `FixedUpdate` pipeline and query/assert on the ECS state.
pub struct TestWorld {
    app: App,
}

impl TestWorld {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Default parameters with a footprint template for every block width.
    pub fn new() -> Self {
        Self::with_params(ParcelParams::default())
    }

    /// Custom parameters with a footprint template for every block width.
    pub fn with_params(params: ParcelParams) -> Self {
        Self::with_block_templates(params, &[])
    }

    /// Custom parameters with templates for every block width except
    /// `missing_widths`.
    pub fn with_block_templates(params: ParcelParams, missing_widths: &[u8]) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        let mut templates = BlockTemplates::default();
        for width in BLOCK_MIN_WIDTH..=MAX_LOT_WIDTH.max(params.width_range.1) {
            if !missing_widths.contains(&width) {
                templates.insert(width, app.world_mut().spawn_empty().id());
            }
        }
        app.insert_resource(templates);
        app.insert_resource(params);

        app.add_plugins(ParcelsPlugin);
        app.init_resource::<ChangeLog>();
        app.add_systems(FixedUpdate, record_changes.in_set(ParcelSet::React));

        // Run one update so Startup systems execute (variant generation).
        app.update();

        Self { app }
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

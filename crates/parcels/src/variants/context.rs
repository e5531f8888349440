use bevy::app::AppExit;
use bevy::prelude::*;

use crate::params::ParcelParams;

use super::cache::VariantCache;
use super::factory::{VariantFactory, WorldVariantFactory};
use super::generator::{generate_variants, GenerationReport};

/// Owns the variant cache and the one-shot generation flag.
///
/// Lives in the `World` as a resource instead of process globals: it is
/// created by the plugin, handed to whoever needs it, and cleared explicitly
/// with [`VariantContext::teardown`]. After generation the cache is
/// read-only for all systems; late registration needs `ResMut`, which the
/// scheduler grants exclusively.
#[derive(Resource, Debug, Default)]
pub struct VariantContext {
    cache: VariantCache,
    generated: bool,
}

impl VariantContext {
    pub fn cache(&self) -> &VariantCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut VariantCache {
        &mut self.cache
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Run generation once. Later calls return an empty report and leave the
    /// cache untouched.
    pub fn generate<F: VariantFactory + ?Sized>(
        &mut self,
        params: &ParcelParams,
        factory: &mut F,
    ) -> GenerationReport {
        if self.generated {
            return GenerationReport::default();
        }
        let report = generate_variants(&mut self.cache, params, factory);
        self.generated = true;
        report
    }

    /// Forget every registration and allow generation to run again.
    pub fn teardown(&mut self) {
        self.cache.clear();
        self.generated = false;
    }
}

/// Startup system: generate every variant in range against the live world.
pub fn generate_parcel_variants(world: &mut World) {
    let params = world
        .get_resource::<ParcelParams>()
        .cloned()
        .unwrap_or_default();

    world.resource_scope(|world, mut ctx: Mut<VariantContext>| {
        if ctx.is_generated() {
            return;
        }
        let mut factory = WorldVariantFactory::new(world);
        let report = ctx.generate(&params, &mut factory);
        info!(
            "Parcel variants: {} pairs generated, {} skipped, {} handles cached",
            report.generated,
            report.skipped.len(),
            ctx.cache().len()
        );
    });
}

/// Release the cache when the app shuts down.
pub fn teardown_variants_on_exit(
    mut exit_events: EventReader<AppExit>,
    mut ctx: ResMut<VariantContext>,
) {
    if exit_events.read().next().is_some() {
        ctx.teardown();
    }
}

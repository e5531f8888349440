use bevy::prelude::*;

use crate::lot::LotSize;
use crate::params::ParcelParams;

use super::cache::VariantCache;
use super::descriptor::{VariantDescriptor, VariantKind};
use super::error::GenerationError;
use super::factory::{VariantFactory, VariantRequest};

/// Outcome of one generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Pairs instantiated, registered and paired.
    pub generated: usize,
    /// Pairs abandoned, with the reason.
    pub skipped: Vec<GenerationError>,
}

/// Instantiate and register a (real, placeholder) pair for every size in
/// range, width-major.
///
/// A failing pair is logged and skipped; nothing of it stays registered and
/// any half-created entity is handed back to the factory. The remaining
/// sizes are still generated.
pub fn generate_variants<F: VariantFactory + ?Sized>(
    cache: &mut VariantCache,
    params: &ParcelParams,
    factory: &mut F,
) -> GenerationReport {
    let mut report = GenerationReport::default();
    for size in params.sizes() {
        match generate_pair(cache, size, factory) {
            Ok(()) => report.generated += 1,
            Err(err) => {
                error!("{err}");
                report.skipped.push(err);
            }
        }
    }
    report
}

fn generate_pair<F: VariantFactory + ?Sized>(
    cache: &mut VariantCache,
    size: LotSize,
    factory: &mut F,
) -> Result<(), GenerationError> {
    let instantiate_err = |source| GenerationError::Instantiate { size, source };

    let template = factory.resolve_template(size).map_err(instantiate_err)?;
    let request = |kind| VariantRequest {
        kind,
        size,
        template,
    };

    let real = factory
        .instantiate(&request(VariantKind::Real))
        .map_err(instantiate_err)?;
    let placeholder = match factory.instantiate(&request(VariantKind::Placeholder)) {
        Ok(entity) => entity,
        Err(source) => {
            factory.discard(real);
            return Err(instantiate_err(source));
        }
    };

    let result = cache.insert_pair(
        VariantDescriptor::new(VariantKind::Real, size, real),
        VariantDescriptor::new(VariantKind::Placeholder, size, placeholder),
    );
    if let Err(source) = result {
        factory.discard(real);
        factory.discard(placeholder);
        return Err(GenerationError::Cache { size, source });
    }
    Ok(())
}

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::lot::{BlockFootprint, LotSize, ParcelFlags, ParcelRecord};

use super::descriptor::{FootprintTemplate, ManagedParcel, ParcelVariant, VariantKind};
use super::error::InstantiateError;

/// What the host is asked to create for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantRequest {
    pub kind: VariantKind,
    pub size: LotSize,
    /// Footprint template shared by the real variant and its placeholder.
    pub template: Entity,
}

/// Host-side entity creation used by the variant generator.
pub trait VariantFactory {
    /// Resolve the shared footprint template a lot of `size` depends on.
    fn resolve_template(&self, size: LotSize) -> Result<Entity, InstantiateError>;

    fn instantiate(&mut self, request: &VariantRequest) -> Result<Entity, InstantiateError>;

    /// Drop an entity created for a pair that was later abandoned.
    fn discard(&mut self, entity: Entity);
}

/// Footprint templates the host registered, keyed by block width in cells.
#[derive(Resource, Debug, Clone, Default)]
pub struct BlockTemplates {
    pub by_width: BTreeMap<u8, Entity>,
}

impl BlockTemplates {
    pub fn get(&self, block_width: u8) -> Option<Entity> {
        self.by_width.get(&block_width).copied()
    }

    pub fn insert(&mut self, block_width: u8, template: Entity) {
        self.by_width.insert(block_width, template);
    }
}

/// [`VariantFactory`] backed directly by the ECS world.
pub struct WorldVariantFactory<'w> {
    world: &'w mut World,
}

impl<'w> WorldVariantFactory<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }
}

impl VariantFactory for WorldVariantFactory<'_> {
    fn resolve_template(&self, size: LotSize) -> Result<Entity, InstantiateError> {
        let block_width = BlockFootprint::for_lot(size).width;
        self.world
            .get_resource::<BlockTemplates>()
            .and_then(|templates| templates.get(block_width))
            .filter(|template| self.world.entities().contains(*template))
            .ok_or(InstantiateError::MissingTemplate { block_width })
    }

    fn instantiate(&mut self, request: &VariantRequest) -> Result<Entity, InstantiateError> {
        if !self.world.entities().contains(request.template) {
            return Err(InstantiateError::Rejected(format!(
                "template {:?} no longer exists",
                request.template
            )));
        }

        let mut flags = ParcelFlags::default();
        flags.set(ParcelFlags::MANAGED, true);
        flags.set(
            ParcelFlags::PLACEHOLDER,
            request.kind == VariantKind::Placeholder,
        );

        let entity = self
            .world
            .spawn((
                ParcelVariant {
                    kind: request.kind,
                    size: request.size,
                },
                FootprintTemplate(request.template),
                ManagedParcel,
                ParcelRecord {
                    flags,
                    ..Default::default()
                },
            ))
            .id();
        Ok(entity)
    }

    fn discard(&mut self, entity: Entity) {
        if !self.world.despawn(entity) {
            debug!("WorldVariantFactory: discarded variant {entity:?} was already gone");
        }
    }
}

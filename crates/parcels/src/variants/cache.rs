use std::collections::{BTreeMap, HashMap};

use bevy::prelude::*;

use super::descriptor::{VariantDescriptor, VariantKind};
use super::error::CacheError;

#[derive(Debug, Clone)]
struct VariantRecord {
    descriptor: VariantDescriptor,
    twin: Option<Entity>,
}

/// Bidirectional, content-addressed index of generated variants.
///
/// `records` is the canonical store (handle → descriptor + twin); `by_hash`
/// is derived from it and only ever changes alongside it. Every mutation
/// goes through `register`, `pair` or `insert_pair`, which validate the
/// whole request before touching either map.
#[derive(Debug, Default)]
pub struct VariantCache {
    records: BTreeMap<Entity, VariantRecord>,
    by_hash: HashMap<u64, Entity>,
}

impl VariantCache {
    /// Insert `hash → handle` and `handle → descriptor`.
    ///
    /// Registering an identical descriptor again is a no-op. A different
    /// handle under an existing hash is a naming defect: it is logged and
    /// rejected, and the first registration stays.
    pub fn register(&mut self, descriptor: VariantDescriptor) -> Result<(), CacheError> {
        let is_new = self.check_register(&descriptor).inspect_err(log_rejection)?;
        if is_new {
            self.commit_register(descriptor);
        }
        Ok(())
    }

    /// Link a real variant with its placeholder, in both directions.
    ///
    /// Both handles must already be registered. Re-pairing the same twins is
    /// a no-op; pairing either side with someone else is rejected.
    pub fn pair(&mut self, real: Entity, placeholder: Entity) -> Result<(), CacheError> {
        self.check_pair(real, placeholder)
            .inspect_err(log_rejection)?;
        self.commit_pair(real, placeholder);
        Ok(())
    }

    /// Register a (real, placeholder) couple and pair it as one step.
    /// Nothing is written unless every part of the request is valid.
    pub fn insert_pair(
        &mut self,
        real: VariantDescriptor,
        placeholder: VariantDescriptor,
    ) -> Result<(), CacheError> {
        self.check_insert_pair(&real, &placeholder)
            .inspect_err(log_rejection)?;

        let (real_entity, placeholder_entity) = (real.entity, placeholder.entity);
        if !self.records.contains_key(&real_entity) {
            self.commit_register(real);
        }
        if !self.records.contains_key(&placeholder_entity) {
            self.commit_register(placeholder);
        }
        self.commit_pair(real_entity, placeholder_entity);
        Ok(())
    }

    pub fn lookup_by_hash(&self, hash: u64) -> Option<Entity> {
        self.by_hash.get(&hash).copied()
    }

    pub fn lookup_descriptor(&self, entity: Entity) -> Option<&VariantDescriptor> {
        self.records.get(&entity).map(|r| &r.descriptor)
    }

    pub fn lookup_pair(&self, entity: Entity) -> Option<Entity> {
        self.records.get(&entity).and_then(|r| r.twin)
    }

    pub fn lookup_identity(&self, identity: &str) -> Option<Entity> {
        self.lookup_by_hash(super::identity_hash(identity))
            .filter(|e| {
                self.records
                    .get(e)
                    .is_some_and(|r| r.descriptor.identity == identity)
            })
    }

    /// The committed variant for `entity`: itself if real, its twin if a
    /// placeholder.
    pub fn resolve_real(&self, entity: Entity) -> Option<Entity> {
        let record = self.records.get(&entity)?;
        match record.descriptor.kind {
            VariantKind::Real => Some(entity),
            VariantKind::Placeholder => record.twin,
        }
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of (real, placeholder) pairings. Every pairing links exactly
    /// two records.
    pub fn pair_count(&self) -> usize {
        let twinned = self.records.values().filter(|r| r.twin.is_some()).count();
        debug_assert!(twinned % 2 == 0, "VariantCache: one-sided pairing");
        twinned / 2
    }

    /// Descriptors in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &VariantDescriptor> {
        self.records.values().map(|r| &r.descriptor)
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
        self.by_hash.clear();
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// `Ok(true)` if the descriptor is new, `Ok(false)` if already present.
    fn check_register(&self, descriptor: &VariantDescriptor) -> Result<bool, CacheError> {
        if let Some(&existing) = self.by_hash.get(&descriptor.hash) {
            if existing != descriptor.entity {
                return Err(CacheError::HashCollision {
                    hash: descriptor.hash,
                    identity: descriptor.identity.clone(),
                    existing,
                    rejected: descriptor.entity,
                });
            }
            return Ok(false);
        }
        if let Some(record) = self.records.get(&descriptor.entity) {
            return Err(CacheError::HandleReused {
                entity: descriptor.entity,
                identity: record.descriptor.identity.clone(),
            });
        }
        Ok(true)
    }

    fn check_pair(&self, real: Entity, placeholder: Entity) -> Result<(), CacheError> {
        if real == placeholder {
            return Err(CacheError::SelfPair(real));
        }
        for (entity, wanted, kind) in [
            (real, placeholder, VariantKind::Real),
            (placeholder, real, VariantKind::Placeholder),
        ] {
            let record = self
                .records
                .get(&entity)
                .ok_or(CacheError::UnknownHandle(entity))?;
            check_kind(entity, record.descriptor.kind, kind)?;
            check_twin(entity, record.twin, wanted)?;
        }
        Ok(())
    }

    fn check_insert_pair(
        &self,
        real: &VariantDescriptor,
        placeholder: &VariantDescriptor,
    ) -> Result<(), CacheError> {
        if real.entity == placeholder.entity {
            return Err(CacheError::SelfPair(real.entity));
        }
        check_kind(real.entity, real.kind, VariantKind::Real)?;
        check_kind(placeholder.entity, placeholder.kind, VariantKind::Placeholder)?;
        if real.hash == placeholder.hash {
            return Err(CacheError::HashCollision {
                hash: placeholder.hash,
                identity: placeholder.identity.clone(),
                existing: real.entity,
                rejected: placeholder.entity,
            });
        }
        for (descriptor, wanted) in [
            (real, placeholder.entity),
            (placeholder, real.entity),
        ] {
            if !self.check_register(descriptor)? {
                let twin = self.records.get(&descriptor.entity).and_then(|r| r.twin);
                check_twin(descriptor.entity, twin, wanted)?;
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Commit (only after validation)
    // -----------------------------------------------------------------------

    fn commit_register(&mut self, descriptor: VariantDescriptor) {
        self.by_hash.insert(descriptor.hash, descriptor.entity);
        self.records.insert(
            descriptor.entity,
            VariantRecord {
                descriptor,
                twin: None,
            },
        );
    }

    fn commit_pair(&mut self, real: Entity, placeholder: Entity) {
        if let Some(record) = self.records.get_mut(&real) {
            record.twin = Some(placeholder);
        }
        if let Some(record) = self.records.get_mut(&placeholder) {
            record.twin = Some(real);
        }
    }
}

fn check_kind(entity: Entity, found: VariantKind, expected: VariantKind) -> Result<(), CacheError> {
    if found == expected {
        Ok(())
    } else {
        Err(CacheError::KindMismatch {
            entity,
            expected,
            found,
        })
    }
}

fn check_twin(entity: Entity, current: Option<Entity>, wanted: Entity) -> Result<(), CacheError> {
    match current {
        Some(existing_twin) if existing_twin != wanted => Err(CacheError::PairConflict {
            entity,
            existing_twin,
            requested_twin: wanted,
        }),
        _ => Ok(()),
    }
}

fn log_rejection(err: &CacheError) {
    error!("VariantCache: {err}");
}

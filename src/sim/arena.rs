//! Entity storage keyed by body handle
//!
//! Iteration is ordered by handle, so a given sequence of inserts and
//! removals always visits entities in the same order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::body::{Aabb, BodyId};
use super::entity::{Entity, EntityKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    entities: BTreeMap<BodyId, Entity>,
    /// Next handle to hand out
    next_id: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Store an entity under a fresh handle
    pub fn insert(&mut self, entity: Entity) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        id
    }

    pub fn remove(&mut self, id: BodyId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn get(&self, id: BodyId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Handles of every entity of `kind`, in handle order
    pub fn ids_of(&self, kind: EntityKind) -> Vec<BodyId> {
        self.iter()
            .filter(|(_, e)| e.kind() == kind)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind() == kind).count()
    }

    /// Collidable entities whose bounds overlap `bounds`, skipping `exclude`
    pub fn overlapping(&self, bounds: &Aabb, exclude: BodyId) -> Vec<BodyId> {
        self.iter()
            .filter(|(id, e)| *id != exclude && e.is_collidable() && e.bounds().overlaps(bounds))
            .map(|(id, _)| id)
            .collect()
    }
}

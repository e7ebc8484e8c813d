//! In-memory structure store.

use dashmap::DashMap;

use crate::infrastructure::ports::{StoreError, StructureStorePort};
use structmover_domain::{Placement, RotateDirection, Structure, StructureId};

#[derive(Default)]
pub struct InMemoryStructureStore {
    structures: DashMap<StructureId, Structure>,
}

impl InMemoryStructureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, structure: Structure) {
        self.structures.insert(structure.id(), structure);
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    fn modify(
        &self,
        id: StructureId,
        apply: impl FnOnce(&mut Structure),
    ) -> Result<(), StoreError> {
        let mut entry = self
            .structures
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        apply(entry.value_mut());
        Ok(())
    }
}

impl StructureStorePort for InMemoryStructureStore {
    fn get(&self, id: StructureId) -> Result<Option<Structure>, StoreError> {
        Ok(self.structures.get(&id).map(|entry| entry.value().clone()))
    }

    fn update_placement(&self, id: StructureId, placement: &Placement) -> Result<(), StoreError> {
        self.modify(id, |structure| structure.apply_placement(*placement))
    }

    fn set_open(&self, id: StructureId, open: bool) -> Result<(), StoreError> {
        self.modify(id, |structure| structure.set_open(open))
    }

    fn set_open_direction(
        &self,
        id: StructureId,
        direction: RotateDirection,
    ) -> Result<(), StoreError> {
        self.modify(id, |structure| structure.set_open_direction(direction))
    }

    fn set_open_distance(&self, id: StructureId, distance: Option<u32>) -> Result<(), StoreError> {
        self.modify(id, |structure| structure.set_open_distance(distance))
    }
}

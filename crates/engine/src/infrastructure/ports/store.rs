//! Structure persistence port.

use structmover_domain::{Placement, RotateDirection, Structure, StructureId};

use super::error::StoreError;

/// Storage collaborator owning persisted structures.
#[cfg_attr(test, mockall::automock)]
pub trait StructureStorePort: Send + Sync {
    fn get(&self, id: StructureId) -> Result<Option<Structure>, StoreError>;

    /// Persist a new bounding box, engine block and engine side.
    fn update_placement(&self, id: StructureId, placement: &Placement) -> Result<(), StoreError>;

    fn set_open(&self, id: StructureId, open: bool) -> Result<(), StoreError>;

    fn set_open_direction(
        &self,
        id: StructureId,
        direction: RotateDirection,
    ) -> Result<(), StoreError>;

    fn set_open_distance(&self, id: StructureId, distance: Option<u32>) -> Result<(), StoreError>;
}

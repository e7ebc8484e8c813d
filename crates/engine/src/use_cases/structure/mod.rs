//! Structure use cases.

mod open_structure;
mod stop_structure;

pub use open_structure::OpenStructure;
pub use stop_structure::StopStructure;

use std::sync::Arc;

/// Container for structure use cases.
pub struct StructureUseCases {
    pub open: Arc<OpenStructure>,
    pub stop: Arc<StopStructure>,
}

impl StructureUseCases {
    pub fn new(open: Arc<OpenStructure>, stop: Arc<StopStructure>) -> Self {
        Self { open, stop }
    }
}

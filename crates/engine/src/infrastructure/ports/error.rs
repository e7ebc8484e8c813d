//! Error types for port operations.

use structmover_domain::{BlockPos, StructureId};

/// Voxel world operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WorldError {
    /// The chunk holding the voxel is not resident.
    #[error("Region not loaded at {pos}")]
    NotLoaded { pos: BlockPos },

    /// The host rejected the write.
    #[error("Write rejected at {pos}: {message}")]
    WriteRejected { pos: BlockPos, message: String },
}

impl WorldError {
    pub fn not_loaded(pos: BlockPos) -> Self {
        Self::NotLoaded { pos }
    }

    pub fn write_rejected(pos: BlockPos, message: impl ToString) -> Self {
        Self::WriteRejected {
            pos,
            message: message.to_string(),
        }
    }
}

/// Proxy entity errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProxyError {
    #[error("Failed to spawn proxy at {pos}: {message}")]
    SpawnFailed { pos: BlockPos, message: String },
}

impl ProxyError {
    pub fn spawn_failed(pos: BlockPos, message: impl ToString) -> Self {
        Self::SpawnFailed {
            pos,
            message: message.to_string(),
        }
    }
}

/// Structure storage errors with context for debugging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Structure not found.
    #[error("Structure not found: {0}")]
    NotFound(StructureId),

    /// Storage backend failed - includes operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Create a Backend error with operation context.
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

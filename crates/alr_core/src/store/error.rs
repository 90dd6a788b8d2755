use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted document: {0}")]
    Corrupted(String),

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Document version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Record not found: {id}")]
    RecordNotFound { id: Uuid },

    #[error("Record {id} is not active")]
    NotActive { id: Uuid },

    #[error("Version conflict on record {id}: expected {expected}, found {found}")]
    Conflict { id: Uuid, expected: u32, found: u32 },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::Conflict { .. } => true, // Caller can re-read and retry
            StoreError::VersionMismatch { .. } => true, // Can try migration
            StoreError::RecordNotFound { .. } => true,
            StoreError::NotActive { .. } => true,
            StoreError::Corrupted(_) => false,
            StoreError::ChecksumMismatch => false,
            _ => false,
        }
    }
}

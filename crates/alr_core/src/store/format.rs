//! Binary codec for the configuration document
//!
//! The file store persists one document holding every record and the full
//! change history. Layout: MessagePack (named fields) compressed with LZ4,
//! SHA-256 checksum appended as the last 32 bytes. Reads verify the checksum
//! before touching the payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

use super::error::StoreError;
use super::{ConfigHistoryEntry, StoredConfigRecord, DOC_VERSION};

/// On-disk document for the file-backed store
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConfigDocument {
    /// Document format version for migration
    pub version: u32,

    /// Last save timestamp
    pub saved_at: DateTime<Utc>,

    pub records: Vec<StoredConfigRecord>,
    pub history: Vec<ConfigHistoryEntry>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self {
            version: DOC_VERSION,
            saved_at: Utc::now(),
            records: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn touch(&mut self) {
        self.saved_at = Utc::now();
    }

    /// Structural invariants: unique ids, at most one active record
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut record_ids = std::collections::HashSet::new();
        let mut active_count = 0usize;

        for record in &self.records {
            if !record_ids.insert(record.id) {
                return Err(StoreError::Corrupted(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
            if record.is_active {
                active_count += 1;
            }
        }

        if active_count > 1 {
            return Err(StoreError::Corrupted(format!(
                "{} records are marked active, at most 1 allowed",
                active_count
            )));
        }

        let mut entry_ids = std::collections::HashSet::new();
        for entry in &self.history {
            if !entry_ids.insert(entry.id) {
                return Err(StoreError::Corrupted(format!(
                    "duplicate history entry id {}",
                    entry.id
                )));
            }
        }

        Ok(())
    }
}

/// Serialize and compress a configuration document
pub fn serialize_and_compress(document: &ConfigDocument) -> Result<Vec<u8>, StoreError> {
    // Validate before serialization
    document.validate()?;

    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(document).map_err(StoreError::Serialization)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a configuration document
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<ConfigDocument, StoreError> {
    // Check minimum size (header + checksum)
    if bytes.len() < 4 + 32 {
        return Err(StoreError::Corrupted("document too short".to_string()));
    }

    // Split payload and checksum
    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    // Verify checksum
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(StoreError::ChecksumMismatch);
    }

    // Decompress
    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;

    // Deserialize
    let document: ConfigDocument =
        from_slice(&msgpack).map_err(StoreError::Deserialization)?;

    // Validate version
    if document.version > DOC_VERSION {
        return Err(StoreError::VersionMismatch {
            found: document.version,
            expected: DOC_VERSION,
        });
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::config::GameBalanceConfig;
    use uuid::Uuid;

    fn record(is_active: bool) -> StoredConfigRecord {
        let now = Utc::now();
        StoredConfigRecord {
            id: Uuid::new_v4(),
            config: GameBalanceConfig::default(),
            is_active,
            version: 1,
            created_by: "admin".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let mut document = ConfigDocument::new();
        document.records.push(record(true));
        document.records.push(record(false));

        let serialized = serialize_and_compress(&document).unwrap();
        let deserialized = decompress_and_deserialize(&serialized).unwrap();

        assert_eq!(document.version, deserialized.version);
        assert_eq!(document.records, deserialized.records);
        assert_eq!(deserialized.history.len(), 0);
    }

    #[test]
    fn test_checksum_validation() {
        let document = ConfigDocument::new();
        let mut serialized = serialize_and_compress(&document).unwrap();

        // Corrupt the checksum
        if let Some(last) = serialized.last_mut() {
            *last = last.wrapping_add(1);
        }

        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(result, Err(StoreError::ChecksumMismatch)));
    }

    #[test]
    fn test_corrupted_payload_detected() {
        let document = ConfigDocument::new();
        let mut serialized = serialize_and_compress(&document).unwrap();

        // Flip a payload byte; the checksum no longer matches
        serialized[4] = serialized[4].wrapping_add(1);

        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(result, Err(StoreError::ChecksumMismatch)));
    }

    #[test]
    fn test_too_short_input_rejected() {
        let result = decompress_and_deserialize(&[0u8; 10]);
        assert!(matches!(result, Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn test_two_active_records_rejected() {
        let mut document = ConfigDocument::new();
        document.records.push(record(true));
        document.records.push(record(true));

        assert!(matches!(document.validate(), Err(StoreError::Corrupted(_))));
        assert!(serialize_and_compress(&document).is_err());
    }

    #[test]
    fn test_duplicate_record_id_rejected() {
        let mut document = ConfigDocument::new();
        let first = record(true);
        let mut second = record(false);
        second.id = first.id;
        document.records.push(first);
        document.records.push(second);

        assert!(matches!(document.validate(), Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn test_future_version_rejected_on_decode() {
        let mut document = ConfigDocument::new();
        document.version = DOC_VERSION + 1;

        let serialized = serialize_and_compress(&document).unwrap();
        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(result, Err(StoreError::VersionMismatch { .. })));
    }
}

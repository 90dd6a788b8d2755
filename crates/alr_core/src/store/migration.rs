use super::error::StoreError;
use super::format::ConfigDocument;
use super::DOC_VERSION;

/// Migrate a configuration document from older format versions
pub fn migrate_document(mut document: ConfigDocument) -> Result<ConfigDocument, StoreError> {
    let original_version = document.version;

    document = match document.version {
        1 => document, // Current version, no migration needed
        v if v > DOC_VERSION => {
            // Future version - might be compatible
            log::warn!(
                "Loading configuration document from future version {} (current: {})",
                v,
                DOC_VERSION
            );
            document
        }
        _ => {
            return Err(StoreError::VersionMismatch {
                found: document.version,
                expected: DOC_VERSION,
            });
        }
    };

    document.version = DOC_VERSION;

    if original_version != DOC_VERSION {
        log::info!(
            "Migrated configuration document from version {} to {}",
            original_version,
            DOC_VERSION
        );
    }

    Ok(document)
}

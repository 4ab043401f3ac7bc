//! # ProfileStore contract
//!
//! A document store keyed by user id. Two operations:
//!
//! - [`ProfileStore::get`] - point read; `Ok(None)` when no document exists.
//! - [`ProfileStore::merge`] - creates the document if absent, otherwise
//!   shallow-merges top-level fields. Fields absent from the partial are left
//!   untouched. Nested objects (`emergencyContact`) are replaced wholesale.
//!
//! Implementations live in sibling modules ([`crate::profile::memory_store`],
//! [`crate::profile::file_store`]) and share [`merge_into_document`] so both
//! follow identical merge rules.

use serde_json::{Map, Value};

use crate::shared::error::StoreError;
use crate::shared::profile::RawProfile;

/// Stored document: top-level field name to value
pub type Document = Map<String, Value>;

/// Async document store for raw profiles.
pub trait ProfileStore {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<RawProfile>, StoreError>>;
    fn merge(
        &self,
        key: &str,
        partial: &RawProfile,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Overwrite each top-level field present in `partial`; keep all others.
pub fn merge_into_document(document: &mut Document, partial: &RawProfile) -> Result<(), StoreError> {
    match serde_json::to_value(partial)? {
        Value::Object(fields) => {
            for (name, value) in fields {
                document.insert(name, value);
            }
            Ok(())
        }
        other => Err(StoreError::Serialization(format!(
            "expected a profile object, got {}",
            other
        ))),
    }
}

/// `base` with every field present in `partial` overwritten, by the same
/// rules a store merge uses.
pub fn merge_profile(base: &RawProfile, partial: &RawProfile) -> Result<RawProfile, StoreError> {
    let mut document = match serde_json::to_value(base)? {
        Value::Object(fields) => fields,
        _ => Document::new(),
    };
    merge_into_document(&mut document, partial)?;
    decode_document(&document)
}

/// Decode a stored document
pub fn decode_document(document: &Document) -> Result<RawProfile, StoreError> {
    Ok(serde_json::from_value(Value::Object(document.clone()))?)
}

/// Keys become file names and map keys; reject anything that could escape.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

//! # Filesystem-backed profile store
//!
//! [`FileProfileStore`] is a [`ProfileStore`] implementation that keeps one
//! JSON document per user so profiles survive restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <user_id>.json     # top-level camelCase profile fields
//! ```
//!
//! Writes go to a uniquely named `<user_id>.json.<uuid>.tmp` first and are
//! renamed into place, so a crash mid-write leaves the previous document
//! intact.
//!
//! A merge holds a per-key lock from the read through the rename, so
//! concurrent writers to disjoint fields of one document never drop each
//! other's fields. The lock table is shared between clones of a store; two
//! stores created separately over the same directory do not coordinate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::profile::store::{decode_document, merge_into_document, validate_key, Document, ProfileStore};
use crate::shared::config::StoreSettings;
use crate::shared::error::StoreError;
use crate::shared::profile::RawProfile;

/// Filesystem-backed ProfileStore
#[derive(Clone, Debug)]
pub struct FileProfileStore {
    base: PathBuf,
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl FileProfileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            locks: Arc::default(),
        }
    }

    /// Store rooted at the configured (or platform default) data directory
    pub fn from_settings(settings: &StoreSettings) -> Result<Self, StoreError> {
        settings
            .resolved_data_dir()
            .map(Self::new)
            .ok_or_else(|| StoreError::Unavailable("no data directory available".to_string()))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{}.json", key))
    }

    fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    async fn read_document(&self, key: &str) -> Result<Option<Document>, StoreError> {
        match tokio::fs::read(self.document_path(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, key: &str, document: &Document) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.base).await?;
        let path = self.document_path(key);
        let tmp = self
            .base
            .join(format!("{}.json.{}.tmp", key, Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(document)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

impl ProfileStore for FileProfileStore {
    async fn get(&self, key: &str) -> Result<Option<RawProfile>, StoreError> {
        validate_key(key)?;
        self.read_document(key)
            .await?
            .as_ref()
            .map(decode_document)
            .transpose()
    }

    async fn merge(&self, key: &str, partial: &RawProfile) -> Result<(), StoreError> {
        validate_key(key)?;
        let lock = self.key_lock(key);
        let _guard = lock.lock().await;
        let mut document = self.read_document(key).await?.unwrap_or_default();
        merge_into_document(&mut document, partial)?;
        self.write_document(key, &document).await?;
        tracing::debug!("[Store] Wrote {}", self.document_path(key).display());
        Ok(())
    }
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::profile::store::{decode_document, merge_into_document, validate_key, Document, ProfileStore};
use crate::shared::error::StoreError;
use crate::shared::profile::RawProfile;

/// In-memory ProfileStore for tests and hosts without a remote store.
#[derive(Clone, Debug)]
pub struct MemoryProfileStore {
    documents: Arc<Mutex<HashMap<String, Document>>>,
    available: Arc<AtomicBool>,
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self {
            documents: Arc::default(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the backing service going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Raw stored document, for inspection.
    pub fn document(&self, key: &str) -> Option<Document> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store offline".to_string()))
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    async fn get(&self, key: &str) -> Result<Option<RawProfile>, StoreError> {
        self.check_available()?;
        validate_key(key)?;
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        documents.get(key).map(decode_document).transpose()
    }

    async fn merge(&self, key: &str, partial: &RawProfile) -> Result<(), StoreError> {
        self.check_available()?;
        validate_key(key)?;
        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        let document = documents.entry(key.to_string()).or_default();
        merge_into_document(document, partial)?;
        tracing::debug!("[Store] Merged profile fields for {}", key);
        Ok(())
    }
}

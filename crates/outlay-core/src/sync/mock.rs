//! Mock remote store for testing
//!
//! Keeps documents in memory and lets tests inject failures for specific
//! keys, so failure isolation and status transitions can be exercised
//! without a server.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::RemoteStore;
use crate::error::{Error, Result};

#[derive(Default)]
pub struct MockRemoteStore {
    documents: Mutex<HashMap<(String, String), Value>>,
    failing_keys: Mutex<HashSet<String>>,
}

impl MockRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every put of this key fail. Reads are unaffected: a document
    /// stored before the key was marked still comes back from fetch.
    pub fn fail_key(&self, key: &str) {
        self.failing_keys
            .lock()
            .expect("mock lock poisoned")
            .insert(key.to_string());
    }

    /// Look up a stored document
    pub fn document(&self, collection: &str, key: &str) -> Option<Value> {
        self.documents
            .lock()
            .expect("mock lock poisoned")
            .get(&(collection.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of stored documents across all collections
    pub fn len(&self) -> usize {
        self.documents.lock().expect("mock lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key_fails(&self, key: &str) -> bool {
        self.failing_keys
            .lock()
            .expect("mock lock poisoned")
            .contains(key)
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn put_document(&self, collection: &str, key: &str, document: Value) -> Result<()> {
        if self.key_fails(key) {
            return Err(Error::Remote(format!("injected failure for key {}", key)));
        }

        self.documents
            .lock()
            .expect("mock lock poisoned")
            .insert((collection.to_string(), key.to_string()), document);
        Ok(())
    }

    async fn fetch_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>> {
        let documents = self.documents.lock().expect("mock lock poisoned");
        Ok(documents
            .iter()
            .filter(|((coll, _), doc)| coll == collection && doc[field] == value)
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}

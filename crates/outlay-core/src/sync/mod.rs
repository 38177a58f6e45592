//! Sync coordination between the local store and the remote document store
//!
//! The coordinator bridges local records to the remote store, tolerant of
//! intermittent connectivity. Uploads are best-effort and at-least-once:
//! a failed upload marks the record FAILED and is retried only when
//! `sync_pending` runs again. Nothing here retries, backs off, or schedules.
//!
//! # Architecture
//!
//! - `RemoteStore` trait: document-oriented remote boundary (full-document
//!   replace + query-by-field)
//! - `NetworkMonitor` trait: point-in-time connectivity check
//! - `RestRemoteStore` / `ProbeMonitor`: HTTP implementations
//! - `MockRemoteStore` / `FixedMonitor`: in-process test doubles

mod mock;
mod rest;

pub use mock::MockRemoteStore;
pub use rest::{ProbeMonitor, RestRemoteStore};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::SyncConfig;
use crate::db::Database;
use crate::error::Result;
use crate::models::{Expense, SyncStatus};

/// Remote collection holding expense documents
pub const EXPENSES_COLLECTION: &str = "expenses";

/// A document-oriented remote store (collection / key / JSON document)
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Full-document replace, keyed by `key`. Idempotent: re-putting the
    /// same document is safe, and concurrent puts are last-write-wins.
    async fn put_document(&self, collection: &str, key: &str, document: Value) -> Result<()>;

    /// Fetch all documents in a collection where `field == value`
    async fn fetch_by_field(&self, collection: &str, field: &str, value: &str)
        -> Result<Vec<Value>>;
}

/// Point-in-time connectivity check
///
/// Connectivity can change between the check and the attempt, so callers
/// re-check before each batch rather than caching the answer.
#[async_trait]
pub trait NetworkMonitor: Send + Sync {
    async fn is_network_available(&self) -> bool;
}

/// A monitor with a fixed answer (tests, or forced-offline operation)
pub struct FixedMonitor(pub bool);

#[async_trait]
impl NetworkMonitor for FixedMonitor {
    async fn is_network_available(&self) -> bool {
        self.0
    }
}

/// Outcome of a `sync_pending` pass
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOutcome {
    pub attempted: usize,
    pub synced: usize,
    pub failed: usize,
}

/// Coordinates uploads of local expense records to the remote store
///
/// Holds no persistent state of its own; everything it knows it reads and
/// writes through the local store.
pub struct SyncCoordinator {
    db: Database,
    remote: Arc<dyn RemoteStore>,
    monitor: Arc<dyn NetworkMonitor>,
    config: SyncConfig,
}

impl SyncCoordinator {
    pub fn new(
        db: Database,
        remote: Arc<dyn RemoteStore>,
        monitor: Arc<dyn NetworkMonitor>,
        config: SyncConfig,
    ) -> Self {
        Self {
            db,
            remote,
            monitor,
            config,
        }
    }

    /// Point-in-time connectivity check, delegated to the monitor
    pub async fn is_network_available(&self) -> bool {
        self.monitor.is_network_available().await
    }

    /// Upload one expense and record the resulting status
    ///
    /// Any remote failure (network, rejection, serialization) is absorbed:
    /// the record is marked FAILED and the returned status reflects that.
    /// Only a local storage failure surfaces as an error.
    pub async fn try_sync(&self, expense: &Expense) -> Result<SyncStatus> {
        let document = remote_projection(expense, &self.config.user_id);
        let key = expense.id.to_string();

        let status = match self
            .remote
            .put_document(EXPENSES_COLLECTION, &key, document)
            .await
        {
            Ok(()) => {
                debug!(id = expense.id, "expense synced");
                SyncStatus::Synced
            }
            Err(err) => {
                warn!(id = expense.id, error = %err, "expense failed to sync");
                SyncStatus::Failed
            }
        };

        self.db.set_sync_status(expense.id, status)?;
        Ok(status)
    }

    /// Upload every PENDING record, sequentially, in store order
    ///
    /// One network check up front; a failure on one record does not block
    /// attempts on the rest. Returns a summary of the pass.
    pub async fn sync_pending(&self) -> Result<SyncOutcome> {
        if !self.is_network_available().await {
            debug!("network unavailable, skipping sync pass");
            return Ok(SyncOutcome::default());
        }

        let pending = self.db.list_pending_expenses()?;
        let mut outcome = SyncOutcome {
            attempted: pending.len(),
            ..Default::default()
        };

        for expense in &pending {
            match self.try_sync(expense).await? {
                SyncStatus::Synced => outcome.synced += 1,
                _ => outcome.failed += 1,
            }
        }

        Ok(outcome)
    }

    /// Fetch this user's raw expense documents from the remote store
    pub async fn fetch_remote(&self) -> Result<Vec<Value>> {
        self.remote
            .fetch_by_field(EXPENSES_COLLECTION, "userId", &self.config.user_id)
            .await
    }
}

/// The fixed projection uploaded for each expense
///
/// Sync status and local identity are deliberately omitted; identity travels
/// only as the document key.
fn remote_projection(expense: &Expense, user_id: &str) -> Value {
    json!({
        "amount": expense.amount,
        "categoryId": expense.category_id,
        "date": expense.date.to_rfc3339(),
        "note": expense.note,
        "userId": user_id,
        "createdAt": expense.created_at.to_rfc3339(),
        "updatedAt": expense.updated_at.to_rfc3339(),
    })
}

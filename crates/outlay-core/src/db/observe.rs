//! Watch-based reactive expense queries
//!
//! A watcher subscribes to the store's data version and re-runs its query
//! whenever the version moves. Delivery is snapshot-replace: a watcher that
//! lags behind rapid writes sees only the latest state, never a replay of
//! intermediate states. Dropping the watcher is the only teardown needed.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::Database;
use crate::error::Result;
use crate::models::Expense;

/// Which slice of the expense set a watcher observes
#[derive(Debug, Clone, Copy)]
pub enum ExpenseFilter {
    All,
    /// Inclusive on both ends
    DateRange(DateTime<Utc>, DateTime<Utc>),
    Category(i64),
}

/// A live subscription to a filtered, ordered expense query
pub struct ExpenseWatcher {
    db: Database,
    filter: ExpenseFilter,
    rx: watch::Receiver<u64>,
}

impl Database {
    /// Subscribe to an expense query; see [`ExpenseWatcher`]
    pub fn watch_expenses(&self, filter: ExpenseFilter) -> ExpenseWatcher {
        ExpenseWatcher {
            db: self.clone(),
            filter,
            rx: self.subscribe_changes(),
        }
    }
}

impl ExpenseWatcher {
    /// Run the query against the current state
    pub fn snapshot(&self) -> Result<Vec<Expense>> {
        match self.filter {
            ExpenseFilter::All => self.db.list_expenses(),
            ExpenseFilter::DateRange(start, end) => {
                self.db.list_expenses_by_date_range(start, end)
            }
            ExpenseFilter::Category(id) => self.db.list_expenses_by_category(id),
        }
    }

    /// Suspend until the store changes, then return the latest snapshot
    ///
    /// Multiple writes between calls coalesce into a single wakeup.
    pub async fn changed(&mut self) -> Result<Vec<Expense>> {
        // The watcher's own db handle keeps the sender alive, so the channel
        // cannot close while we wait.
        let _ = self.rx.changed().await;
        self.snapshot()
    }
}

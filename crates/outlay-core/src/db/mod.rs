//! Local storage layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `expenses` - Expense facade (CRUD, range/category queries, sync status)
//! - `categories` - Category CRUD and default seeding
//! - `budgets` - Monthly budget ceilings
//! - `observe` - Watch-based reactive expense queries

use std::sync::Arc;

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tokio::sync::watch;
use tracing::info;

use crate::error::Result;

mod budgets;
mod categories;
mod expenses;
mod observe;

pub use observe::{ExpenseFilter, ExpenseWatcher};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Timestamps are stored as UTC "YYYY-MM-DD HH:MM:SS" strings so that
/// lexicographic BETWEEN matches chronological order.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a stored datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    chrono::NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Format a DateTime<Utc> for storage
pub(crate) fn fmt_datetime(dt: DateTime<Utc>) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Database wrapper with connection pooling
///
/// The single shared mutable resource in the system. All components go
/// through the facade methods on this type; writes bump a data version that
/// drives the reactive queries in [`observe`].
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    db_path: String,
    /// Data version channel. Bumped after every committed write; watchers
    /// requery on change (snapshot-replace, not event-replay).
    changes: Arc<watch::Sender<u64>>,
}

impl Database {
    /// Open (or create) a database at the given path
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let (changes, _) = watch::channel(0);
        let db = Self {
            pool,
            db_path: path.to_string(),
            changes: Arc::new(changes),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a temporary file rather than `:memory:` because each pooled
    /// connection to `:memory:` would see its own private database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!(
            "{}/outlay_test_{}_{}.db",
            std::env::temp_dir().display(),
            std::process::id(),
            id
        );

        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Mark the data as changed, waking all expense watchers
    pub(crate) fn notify_changed(&self) {
        self.changes.send_modify(|v| *v = v.wrapping_add(1));
    }

    pub(crate) fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- Categories. No uniqueness on name: unique by convention only.
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                icon TEXT NOT NULL DEFAULT '',
                color TEXT NOT NULL DEFAULT ''
            );

            -- Expenses. category_id is a plain column, not a declared foreign
            -- key: reports group by the raw id even if the category is gone.
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                category_id INTEGER NOT NULL,
                date DATETIME NOT NULL,
                note TEXT NOT NULL DEFAULT '',
                sync_status TEXT NOT NULL DEFAULT 'PENDING',
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
            CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category_id);
            CREATE INDEX IF NOT EXISTS idx_expenses_sync_status ON expenses(sync_status);

            -- Budgets. One ceiling per (category, month, year); the facade
            -- upserts on this tuple rather than replacing by rowid.
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY,
                category_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                month INTEGER NOT NULL,
                year INTEGER NOT NULL,
                UNIQUE(category_id, month, year)
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

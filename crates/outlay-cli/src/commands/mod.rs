//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budgets` - Budget management commands (list, set, delete)
//! - `categories` - Category management commands (list, add, delete, seed)
//! - `expenses` - Expense commands (add, list, delete)
//! - `reports` - Report generation commands (daily, monthly)
//! - `sync` - Remote sync commands (sync, fetch)

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod reports;
pub mod sync;

// Re-export command functions for main.rs
pub use budgets::*;
pub use categories::*;
pub use expenses::*;
pub use reports::*;
pub use sync::*;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::debug;
use outlay_core::{
    Category, Database, ExpenseStore, FixedMonitor, MockRemoteStore, ProbeMonitor, RestRemoteStore,
    SyncConfig, SyncCoordinator,
};

/// Open the database at the given path
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    debug!(path = %path_str, "opening database");
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    db.seed_default_categories()
        .context("Failed to seed default categories")?;

    println!("✅ Database initialized!");
    println!();
    println!("Next steps:");
    println!("  1. Add an expense: outlay add --text \"spent 250 on groceries\"");
    println!("  2. See the month:  outlay report monthly");

    Ok(())
}

/// Build the expense store with sync wired from the environment
///
/// With OUTLAY_SYNC_URL set, uploads go to that document store and
/// connectivity is probed per attempt. Without it the store runs purely
/// local: the monitor always reports offline, so the placeholder remote
/// is never contacted.
pub fn build_store(db: Database) -> ExpenseStore {
    let config = SyncConfig::from_env();

    let sync = match RestRemoteStore::from_config(&config) {
        Some(remote) => {
            let base_url = config.base_url.clone().unwrap_or_default();
            debug!(url = %base_url, user_id = %config.user_id, "remote sync configured");
            SyncCoordinator::new(
                db.clone(),
                Arc::new(remote),
                Arc::new(ProbeMonitor::new(&base_url)),
                config,
            )
        }
        None => {
            debug!("no remote configured, running purely local");
            SyncCoordinator::new(
                db.clone(),
                Arc::new(MockRemoteStore::new()),
                Arc::new(FixedMonitor(false)),
                config,
            )
        }
    };

    ExpenseStore::new(db, Arc::new(sync))
}

/// Resolve a category name to its record (case-insensitive)
pub fn resolve_category(db: &Database, name: &str) -> Result<Category> {
    let categories = db.list_categories()?;
    categories
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .with_context(|| format!("Unknown category: {}", name))
}

/// Parse a YYYY-MM-DD argument into the start of that day, UTC
pub fn parse_day(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .context("Invalid date format (use YYYY-MM-DD)")?;
    Ok(Utc
        .from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid")))
}

/// Truncate a string to a maximum byte length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }

    // Back off to a char boundary so multibyte text (emoji icons, non-ASCII
    // notes) cannot split mid-character.
    let mut cut = max.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

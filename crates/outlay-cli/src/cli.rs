//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Outlay - Track expenses locally, sync opportunistically
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Offline-first expense tracker with best-effort remote sync", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "outlay.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed default categories
    Init,

    /// Add an expense
    ///
    /// Either pass structured flags (--amount, --category, ...) or --text
    /// to parse a natural-language phrase like "spent 250 on groceries
    /// yesterday".
    Add {
        /// Expense amount (must be positive)
        #[arg(short, long)]
        amount: Option<f64>,

        /// Category name (defaults to Others)
        #[arg(short, long)]
        category: Option<String>,

        /// Expense date, YYYY-MM-DD (defaults to now)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-form note
        #[arg(short, long, default_value = "")]
        note: String,

        /// Natural-language phrase to parse instead of structured flags
        #[arg(short, long, conflicts_with_all = ["amount", "date"])]
        text: Option<String>,
    },

    /// List expenses
    List {
        /// Only expenses in this category (by name)
        #[arg(short, long)]
        category: Option<String>,

        /// Start date, YYYY-MM-DD (inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date, YYYY-MM-DD (inclusive)
        #[arg(long)]
        to: Option<String>,
    },

    /// Delete an expense (local only, the remote copy is kept)
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Manage categories (list, add, delete, seed)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage monthly budgets (list, set, delete)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Generate spending reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Upload all pending expenses to the remote store
    Sync,

    /// Fetch this user's expense documents from the remote store
    Fetch,
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,

    /// Add a category
    Add {
        /// Category name
        name: String,

        /// Emoji icon
        #[arg(short, long, default_value = "")]
        icon: String,

        /// Hex color, e.g. #FF6B6B
        #[arg(short, long, default_value = "")]
        color: String,
    },

    /// Delete a category (refused while expenses reference it)
    Delete {
        /// Category ID
        id: i64,
    },

    /// Seed the default categories (no-op if any category exists)
    Seed,
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets
    List,

    /// Set a budget ceiling for a category and month
    Set {
        /// Category name
        category: String,

        /// Budget amount
        amount: f64,

        /// Month 1-12 (defaults to current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Total spending for one day
    Daily {
        /// Day to report on, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Monthly total, per-category breakdown, and budget status
    Monthly {
        /// Month 1-12 (defaults to current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

//! Outlay Core Library
//!
//! Shared functionality for the Outlay expense tracker:
//! - Local SQLite storage with watch-based reactive queries
//! - Expense store facade with opportunistic remote sync
//! - Sync coordinator for the remote document store
//! - Daily/monthly report aggregation
//! - Natural-language expense parsing

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod parser;
pub mod reports;
pub mod store;
pub mod sync;

pub use config::SyncConfig;
pub use db::{Database, ExpenseFilter, ExpenseWatcher};
pub use error::{Error, Result};
pub use models::{
    Budget, BudgetStatus, Category, CategoryExpense, DailyReport, Expense, MonthlyReport,
    ParsedExpense, SyncStatus,
};
pub use parser::parse_expense;
pub use reports::{budget_status, daily_report, monthly_report};
pub use store::ExpenseStore;
pub use sync::{
    FixedMonitor, MockRemoteStore, NetworkMonitor, ProbeMonitor, RemoteStore, RestRemoteStore,
    SyncCoordinator, SyncOutcome,
};

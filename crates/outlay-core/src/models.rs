//! Domain models for Outlay

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded spend event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Local identity. 0 means unassigned (a new, not yet persisted record).
    pub id: i64,
    pub amount: f64,
    pub category_id: i64,
    /// When the money was spent. Used for both reporting windows and list order.
    pub date: DateTime<Utc>,
    pub note: String,
    pub sync_status: SyncStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Build a new, unpersisted expense. Identity is assigned on insert and
    /// the store forces the status to pending regardless of what is set here.
    pub fn new(amount: f64, category_id: i64, date: DateTime<Utc>, note: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            amount,
            category_id,
            date,
            note: note.into(),
            sync_status: SyncStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Upload state of an expense relative to the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyncStatus {
    /// Not yet uploaded
    #[default]
    Pending,
    /// Confirmed remote copy
    Synced,
    /// Last upload attempt failed; retried on the next sync_pending pass
    Failed,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Synced => "SYNCED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::str::FromStr for SyncStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "SYNCED" => Ok(Self::Synced),
            "FAILED" => Ok(Self::Failed),
            _ => Err(format!("Unknown sync status: {}", s)),
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spend classification, either user-defined or one of the seeded defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Unique by convention only; not enforced by the store.
    pub name: String,
    /// Display glyph (emoji)
    pub icon: String,
    /// Hex color string; malformed values are a rendering concern, not ours
    pub color: String,
}

/// A monthly spend ceiling tied to a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub amount: f64,
    /// 1-12
    pub month: u32,
    pub year: i32,
}

/// Aggregated spend for a single day. Derived, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: DateTime<Utc>,
    pub total_amount: f64,
    pub expense_count: usize,
}

/// Aggregated spend for a calendar month with a per-category breakdown
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub total_amount: f64,
    /// Keyed by raw category id; ids of since-deleted categories appear as-is.
    pub category_breakdown: BTreeMap<i64, CategoryExpense>,
}

/// Per-category slice of a monthly report
#[derive(Debug, Clone, Serialize)]
pub struct CategoryExpense {
    pub category_id: i64,
    pub amount: f64,
    /// Share of the monthly total in [0, 100]. Slices are not guaranteed to
    /// sum to exactly 100 (floating point).
    pub percentage: f64,
    pub count: usize,
}

/// Monthly budget vs actual for one category
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub category_id: i64,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

/// Candidate expense extracted from free text
///
/// The three fields are extracted independently; any of them may be absent
/// without affecting the others.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpense {
    pub amount: Option<f64>,
    pub category_name: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

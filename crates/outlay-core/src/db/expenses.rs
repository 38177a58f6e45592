//! Expense operations
//!
//! Callers are expected to have validated input at the boundary (amount > 0,
//! category chosen); the store persists what it is given.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::{fmt_datetime, parse_datetime, Database};
use crate::error::Result;
use crate::models::{Expense, SyncStatus};

const EXPENSE_COLUMNS: &str =
    "id, amount, category_id, date, note, sync_status, created_at, updated_at";

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let date: String = row.get(3)?;
    let status: String = row.get(5)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category_id: row.get(2)?,
        date: parse_datetime(&date),
        note: row.get(4)?,
        sync_status: status.parse().unwrap_or(SyncStatus::Pending),
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    /// Insert an expense, assigning a new identity
    ///
    /// The stored record always starts out PENDING; whatever status the
    /// caller set on the value is ignored. Returns the assigned id.
    pub fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (amount, category_id, date, note, sync_status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                expense.amount,
                expense.category_id,
                fmt_datetime(expense.date),
                expense.note,
                SyncStatus::Pending.as_str(),
                fmt_datetime(expense.created_at),
                fmt_datetime(expense.updated_at),
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.notify_changed();
        Ok(id)
    }

    /// Overwrite the record matching the expense's identity (upsert by id)
    ///
    /// Note: the sync status is written through as-is. Editing an already
    /// SYNCED expense does not put it back into the pending queue; see the
    /// `update_preserves_sync_status` test.
    pub fn update_expense(&self, expense: &Expense) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (id, amount, category_id, date, note, sync_status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                amount = excluded.amount,
                category_id = excluded.category_id,
                date = excluded.date,
                note = excluded.note,
                sync_status = excluded.sync_status,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at
            "#,
            params![
                expense.id,
                expense.amount,
                expense.category_id,
                fmt_datetime(expense.date),
                expense.note,
                expense.sync_status.as_str(),
                fmt_datetime(expense.created_at),
                fmt_datetime(expense.updated_at),
            ],
        )?;

        self.notify_changed();
        Ok(())
    }

    /// Physically remove an expense by identity
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        self.notify_changed();
        Ok(())
    }

    /// Fetch a single expense by identity
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                &format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS),
                params![id],
                expense_from_row,
            )
            .optional()?;
        Ok(expense)
    }

    /// List all expenses, newest first
    pub fn list_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY date DESC, id DESC",
            EXPENSE_COLUMNS
        ))?;
        let expenses = stmt
            .query_map([], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// List expenses with `start <= date <= end`, inclusive both ends
    pub fn list_expenses_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE date BETWEEN ? AND ? ORDER BY date DESC, id DESC",
            EXPENSE_COLUMNS
        ))?;
        let expenses = stmt
            .query_map(
                params![fmt_datetime(start), fmt_datetime(end)],
                expense_from_row,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// List expenses for one category, newest first
    pub fn list_expenses_by_category(&self, category_id: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE category_id = ? ORDER BY date DESC, id DESC",
            EXPENSE_COLUMNS
        ))?;
        let expenses = stmt
            .query_map(params![category_id], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// List records awaiting upload, in store order
    pub fn list_pending_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE sync_status = ?",
            EXPENSE_COLUMNS
        ))?;
        let expenses = stmt
            .query_map(params![SyncStatus::Pending.as_str()], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// Targeted single-field update of an expense's sync status
    pub fn set_sync_status(&self, id: i64, status: SyncStatus) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE expenses SET sync_status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        self.notify_changed();
        Ok(())
    }
}

//! Budget operations
//!
//! Budgets are unique per (category, month, year). Unlike the plain insert
//! path, `set_budget` merges on that tuple so a second ceiling for the same
//! month replaces the first instead of sitting alongside it.

use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::error::Result;
use crate::models::Budget;

fn budget_from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        amount: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
    })
}

impl Database {
    /// List all budgets, most recent month first
    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, category_id, amount, month, year FROM budgets ORDER BY year DESC, month DESC",
        )?;
        let budgets = stmt
            .query_map([], budget_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    /// Fetch a single budget by identity
    pub fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, category_id, amount, month, year FROM budgets WHERE id = ?",
                params![id],
                budget_from_row,
            )
            .optional()?;
        Ok(budget)
    }

    /// Look up the ceiling for one category and month
    pub fn budget_for_category_month(
        &self,
        category_id: i64,
        month: u32,
        year: i32,
    ) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, category_id, amount, month, year FROM budgets
                 WHERE category_id = ? AND month = ? AND year = ?",
                params![category_id, month, year],
                budget_from_row,
            )
            .optional()?;
        Ok(budget)
    }

    /// Set the ceiling for (category, month, year), merging on conflict
    ///
    /// Returns the id of the stored row (the existing row's id when merging).
    pub fn set_budget(&self, budget: &Budget) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO budgets (category_id, amount, month, year)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(category_id, month, year) DO UPDATE SET amount = excluded.amount
            "#,
            params![budget.category_id, budget.amount, budget.month, budget.year],
        )?;

        let id = conn.query_row(
            "SELECT id FROM budgets WHERE category_id = ? AND month = ? AND year = ?",
            params![budget.category_id, budget.month, budget.year],
            |row| row.get(0),
        )?;
        self.notify_changed();
        Ok(id)
    }

    /// Delete a budget by identity
    pub fn delete_budget(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        self.notify_changed();
        Ok(())
    }

    /// List budgets for one month
    pub fn budgets_for_month(&self, month: u32, year: i32) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, category_id, amount, month, year FROM budgets
             WHERE month = ? AND year = ? ORDER BY category_id",
        )?;
        let budgets = stmt
            .query_map(params![month, year], budget_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(budgets)
    }
}

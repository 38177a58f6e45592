//! Category operations and default seeding

use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use super::Database;
use crate::error::{Error, Result};
use crate::models::Category;

/// The eight categories every fresh database starts with
const DEFAULT_CATEGORIES: [(&str, &str, &str); 8] = [
    ("Food", "🍔", "#FF6B6B"),
    ("Groceries", "🛒", "#4ECDC4"),
    ("Transport", "🚗", "#45B7D1"),
    ("Entertainment", "🎬", "#96CEB4"),
    ("Shopping", "🛍️", "#FFEAA7"),
    ("Bills", "💡", "#DFE6E9"),
    ("Health", "🏥", "#74B9FF"),
    ("Others", "💰", "#A29BFE"),
];

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
    })
}

impl Database {
    /// List all categories, name ascending
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, icon, color FROM categories ORDER BY name ASC")?;
        let categories = stmt
            .query_map([], category_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Fetch a single category by identity
    pub fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name, icon, color FROM categories WHERE id = ?",
                params![id],
                category_from_row,
            )
            .optional()?;
        Ok(category)
    }

    /// Insert a category, returning the assigned id
    pub fn insert_category(&self, category: &Category) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categories (name, icon, color) VALUES (?, ?, ?)",
            params![category.name, category.icon, category.color],
        )?;
        let id = conn.last_insert_rowid();
        self.notify_changed();
        Ok(id)
    }

    /// Overwrite a category by identity
    pub fn update_category(&self, category: &Category) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE categories SET name = ?, icon = ?, color = ? WHERE id = ?",
            params![category.name, category.icon, category.color, category.id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Category not found: {}", category.id)));
        }
        self.notify_changed();
        Ok(())
    }

    /// Delete a category, refusing while any expense still references it
    pub fn delete_category(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let referenced: i64 = conn.query_row(
            "SELECT COUNT(*) FROM expenses WHERE category_id = ?",
            params![id],
            |row| row.get(0),
        )?;
        if referenced > 0 {
            return Err(Error::Conflict(format!(
                "Category {} is referenced by {} expense(s)",
                id, referenced
            )));
        }

        conn.execute("DELETE FROM categories WHERE id = ?", params![id])?;
        self.notify_changed();
        Ok(())
    }

    /// Count all categories
    pub fn category_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Seed the default categories if the table is empty
    ///
    /// The emptiness check and the inserts commit together in one
    /// transaction, so two concurrent first launches cannot double-seed.
    pub fn seed_default_categories(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let count: i64 = tx.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        for (name, icon, color) in DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT INTO categories (name, icon, color) VALUES (?, ?, ?)",
                params![name, icon, color],
            )?;
        }
        tx.commit()?;

        info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
        self.notify_changed();
        Ok(())
    }
}

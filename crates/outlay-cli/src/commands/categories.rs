//! Category command implementations

use anyhow::Result;
use outlay_core::{Category, Database};

pub fn cmd_categories_list(db: &Database) -> Result<()> {
    let categories = db.list_categories()?;

    if categories.is_empty() {
        println!("No categories. Run 'outlay init' or 'outlay categories seed'.");
        return Ok(());
    }

    println!();
    println!("   {:>5} │ {:3} │ {:16} │ Color", "ID", "", "Name");
    println!("   ──────┼─────┼──────────────────┼─────────");
    for category in &categories {
        println!(
            "   {:>5} │ {:3} │ {:16} │ {}",
            category.id, category.icon, category.name, category.color
        );
    }

    Ok(())
}

pub fn cmd_categories_add(db: &Database, name: &str, icon: &str, color: &str) -> Result<()> {
    let id = db.insert_category(&Category {
        id: 0,
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    })?;

    println!("✅ Added category #{}: {} {}", id, icon, name);
    Ok(())
}

pub fn cmd_categories_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_category(id)?;
    println!("🗑️  Deleted category #{}", id);
    Ok(())
}

pub fn cmd_categories_seed(db: &Database) -> Result<()> {
    let before = db.category_count()?;
    db.seed_default_categories()?;
    let after = db.category_count()?;

    if after > before {
        println!("✅ Seeded {} default categories", after - before);
    } else {
        println!("Categories already present, nothing to seed.");
    }

    Ok(())
}

//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::sync::Arc;

use outlay_core::{
    Database, ExpenseStore, FixedMonitor, MockRemoteStore, SyncConfig, SyncCoordinator,
};

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.seed_default_categories().unwrap();
    db
}

fn setup_test_store(db: &Database, online: bool) -> (ExpenseStore, Arc<MockRemoteStore>) {
    let remote = Arc::new(MockRemoteStore::new());
    let sync = Arc::new(SyncCoordinator::new(
        db.clone(),
        remote.clone(),
        Arc::new(FixedMonitor(online)),
        SyncConfig::default(),
    ));
    (ExpenseStore::new(db.clone(), sync), remote)
}

// ========== Add Command Tests ==========

#[tokio::test]
async fn test_cmd_add_structured() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);

    let result = commands::cmd_add(&store, Some(42.5), Some("Food"), None, "lunch", None).await;
    assert!(result.is_ok());

    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, 42.5);
    assert_eq!(expenses[0].note, "lunch");
}

#[tokio::test]
async fn test_cmd_add_rejects_non_positive_amount() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);

    assert!(commands::cmd_add(&store, Some(0.0), None, None, "", None)
        .await
        .is_err());
    assert!(commands::cmd_add(&store, Some(-5.0), None, None, "", None)
        .await
        .is_err());
    assert!(db.list_expenses().unwrap().is_empty());
}

#[tokio::test]
async fn test_cmd_add_defaults_to_others() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);

    commands::cmd_add(&store, Some(10.0), None, None, "", None)
        .await
        .unwrap();

    let others = commands::resolve_category(&db, "Others").unwrap();
    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses[0].category_id, others.id);
}

#[tokio::test]
async fn test_cmd_add_unknown_category_fails() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);

    let result = commands::cmd_add(&store, Some(10.0), Some("Nonsense"), None, "", None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_add_parses_text() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);

    let result = commands::cmd_add(
        &store,
        None,
        None,
        None,
        "",
        Some("spent 250 on groceries yesterday"),
    )
    .await;
    assert!(result.is_ok());

    let groceries = commands::resolve_category(&db, "Groceries").unwrap();
    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, 250.0);
    assert_eq!(expenses[0].category_id, groceries.id);
    // The phrase becomes the note when none is given.
    assert_eq!(expenses[0].note, "spent 250 on groceries yesterday");
}

#[tokio::test]
async fn test_cmd_add_text_without_amount_fails() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);

    let result = commands::cmd_add(&store, None, None, None, "", Some("bought some things")).await;
    assert!(result.is_err());
    assert!(db.list_expenses().unwrap().is_empty());
}

// ========== List / Delete Command Tests ==========

#[tokio::test]
async fn test_cmd_list_modes() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);
    commands::cmd_add(&store, Some(10.0), Some("Food"), Some("2024-03-15"), "", None)
        .await
        .unwrap();

    assert!(commands::cmd_list(&db, None, None, None).is_ok());
    assert!(commands::cmd_list(&db, Some("Food"), None, None).is_ok());
    assert!(commands::cmd_list(&db, None, Some("2024-03-01"), Some("2024-03-31")).is_ok());

    // Mixed filters are refused.
    assert!(commands::cmd_list(&db, Some("Food"), Some("2024-03-01"), Some("2024-03-31")).is_err());
    // A lone --from is refused too.
    assert!(commands::cmd_list(&db, None, Some("2024-03-01"), None).is_err());
}

#[tokio::test]
async fn test_cmd_delete() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);
    commands::cmd_add(&store, Some(10.0), None, None, "", None)
        .await
        .unwrap();
    let id = db.list_expenses().unwrap()[0].id;

    assert!(commands::cmd_delete(&store, id).await.is_ok());
    assert!(db.list_expenses().unwrap().is_empty());

    // Deleting again reports the missing id.
    assert!(commands::cmd_delete(&store, id).await.is_err());
}

// ========== Categories Command Tests ==========

#[test]
fn test_cmd_categories_add_and_list() {
    let db = setup_test_db();

    assert!(commands::cmd_categories_add(&db, "Travel", "✈️", "#123456").is_ok());
    assert!(commands::cmd_categories_list(&db).is_ok());

    let travel = commands::resolve_category(&db, "travel").unwrap();
    assert_eq!(travel.name, "Travel");
}

#[tokio::test]
async fn test_cmd_categories_delete_refuses_referenced() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);
    commands::cmd_add(&store, Some(10.0), Some("Food"), None, "", None)
        .await
        .unwrap();

    let food = commands::resolve_category(&db, "Food").unwrap();
    assert!(commands::cmd_categories_delete(&db, food.id).is_err());

    let bills = commands::resolve_category(&db, "Bills").unwrap();
    assert!(commands::cmd_categories_delete(&db, bills.id).is_ok());
}

#[test]
fn test_cmd_categories_seed_is_idempotent() {
    let db = setup_test_db();
    assert!(commands::cmd_categories_seed(&db).is_ok());
    assert_eq!(db.category_count().unwrap(), 8);
}

// ========== Budgets Command Tests ==========

#[test]
fn test_cmd_budgets_set() {
    let db = setup_test_db();

    assert!(commands::cmd_budgets_set(&db, "Food", 500.0, Some(3), Some(2024)).is_ok());
    assert!(commands::cmd_budgets_list(&db).is_ok());

    let food = commands::resolve_category(&db, "Food").unwrap();
    let budget = db.budget_for_category_month(food.id, 3, 2024).unwrap();
    assert_eq!(budget.unwrap().amount, 500.0);
}

#[test]
fn test_cmd_budgets_set_rejects_bad_input() {
    let db = setup_test_db();
    assert!(commands::cmd_budgets_set(&db, "Food", -1.0, Some(3), Some(2024)).is_err());
    assert!(commands::cmd_budgets_set(&db, "Food", 100.0, Some(13), Some(2024)).is_err());
    assert!(commands::cmd_budgets_set(&db, "Nonsense", 100.0, Some(3), Some(2024)).is_err());
}

// ========== Report Command Tests ==========

#[tokio::test]
async fn test_cmd_reports_run() {
    let db = setup_test_db();
    let (store, _remote) = setup_test_store(&db, false);
    commands::cmd_add(&store, Some(75.0), Some("Food"), Some("2024-03-15"), "", None)
        .await
        .unwrap();
    commands::cmd_budgets_set(&db, "Food", 100.0, Some(3), Some(2024)).unwrap();

    assert!(commands::cmd_report_daily(&db, Some("2024-03-15")).is_ok());
    assert!(commands::cmd_report_monthly(&db, Some(3), Some(2024)).is_ok());
    assert!(commands::cmd_report_monthly(&db, Some(13), Some(2024)).is_err());
}

// ========== Helpers ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer string", 10), "a much ...");
}

#[test]
fn test_truncate_multibyte() {
    // An emoji-heavy note must not split mid-character.
    let note = "🍕".repeat(11); // 44 bytes, boundary falls inside a char
    let truncated = truncate(&note, 40);
    assert_eq!(truncated, format!("{}...", "🍕".repeat(9)));

    assert_eq!(truncate("héllo wörld étc", 10), "héllo ...");
    assert_eq!(truncate("日本語のテキスト", 10), "日本...");
}

#[test]
fn test_parse_day() {
    assert!(commands::parse_day("2024-03-15").is_ok());
    assert!(commands::parse_day("not-a-date").is_err());
    assert!(commands::parse_day("2024-13-01").is_err());
}

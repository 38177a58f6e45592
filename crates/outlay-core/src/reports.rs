//! Report aggregation
//!
//! Reports are computed on demand: query the local store for a date window,
//! reduce in memory. Nothing here is persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{BudgetStatus, CategoryExpense, DailyReport, Expense, MonthlyReport};

/// Window covering one calendar day: [00:00:00, next day - 1s], inclusive
fn day_window(day: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::seconds(1);
    (start, end)
}

/// Window covering one calendar month: [first instant, next month - 1s]
fn month_window(month: u32, year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}-{}", year, month)))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}-{}", year, month)))?;

    let start = first.and_time(NaiveTime::MIN).and_utc();
    let end = next.and_time(NaiveTime::MIN).and_utc() - Duration::seconds(1);
    Ok((start, end))
}

/// Total spend and count for one day. An empty window yields 0.0 / 0.
pub fn daily_report(db: &Database, day: DateTime<Utc>) -> Result<DailyReport> {
    let (start, end) = day_window(day);
    let expenses = db.list_expenses_by_date_range(start, end)?;

    Ok(DailyReport {
        date: day,
        total_amount: expenses.iter().map(|e| e.amount).sum(),
        expense_count: expenses.len(),
    })
}

/// Monthly total plus per-category breakdown with percentages
///
/// Grouping keys are raw category ids; an id whose category has since been
/// deleted is grouped as-is, with no validation against the category store.
pub fn monthly_report(db: &Database, month: u32, year: i32) -> Result<MonthlyReport> {
    let (start, end) = month_window(month, year)?;
    let expenses = db.list_expenses_by_date_range(start, end)?;

    Ok(reduce_monthly(month, year, &expenses))
}

fn reduce_monthly(month: u32, year: i32, expenses: &[Expense]) -> MonthlyReport {
    let total_amount: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut groups: BTreeMap<i64, Vec<&Expense>> = BTreeMap::new();
    for expense in expenses {
        groups.entry(expense.category_id).or_default().push(expense);
    }

    let category_breakdown = groups
        .into_iter()
        .map(|(category_id, group)| {
            let amount: f64 = group.iter().map(|e| e.amount).sum();
            let percentage = if total_amount > 0.0 {
                (amount / total_amount) * 100.0
            } else {
                0.0
            };
            (
                category_id,
                CategoryExpense {
                    category_id,
                    amount,
                    percentage,
                    count: group.len(),
                },
            )
        })
        .collect();

    MonthlyReport {
        month,
        year,
        total_amount,
        category_breakdown,
    }
}

/// Budget vs actual for every budgeted category in a month
pub fn budget_status(db: &Database, month: u32, year: i32) -> Result<Vec<BudgetStatus>> {
    let report = monthly_report(db, month, year)?;
    let budgets = db.budgets_for_month(month, year)?;

    Ok(budgets
        .into_iter()
        .map(|budget| {
            let spent = report
                .category_breakdown
                .get(&budget.category_id)
                .map(|c| c.amount)
                .unwrap_or(0.0);
            BudgetStatus {
                category_id: budget.category_id,
                limit: budget.amount,
                spent,
                remaining: budget.amount - spent,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Expense};
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 30, 0).unwrap()
    }

    fn insert(db: &Database, amount: f64, category_id: i64, date: DateTime<Utc>) {
        db.insert_expense(&Expense::new(amount, category_id, date, ""))
            .unwrap();
    }

    #[test]
    fn daily_report_on_empty_range_is_zero() {
        let db = Database::in_memory().unwrap();
        let report = daily_report(&db, at(2024, 3, 15, 12)).unwrap();
        assert_eq!(report.total_amount, 0.0);
        assert_eq!(report.expense_count, 0);
    }

    #[test]
    fn daily_report_window_is_inclusive() {
        let db = Database::in_memory().unwrap();
        insert(&db, 10.0, 1, at(2024, 3, 15, 0));
        insert(&db, 20.0, 1, at(2024, 3, 15, 23));
        // Neighboring days stay out of the window.
        insert(&db, 99.0, 1, at(2024, 3, 14, 23));
        insert(&db, 99.0, 1, at(2024, 3, 16, 0));

        let report = daily_report(&db, at(2024, 3, 15, 12)).unwrap();
        assert_eq!(report.total_amount, 30.0);
        assert_eq!(report.expense_count, 2);
    }

    #[test]
    fn monthly_breakdown_sums_to_total() {
        let db = Database::in_memory().unwrap();
        insert(&db, 100.0, 1, at(2024, 3, 1, 9));
        insert(&db, 50.0, 2, at(2024, 3, 10, 9));
        insert(&db, 25.0, 2, at(2024, 3, 31, 9));
        insert(&db, 999.0, 1, at(2024, 4, 1, 0)); // next month

        let report = monthly_report(&db, 3, 2024).unwrap();
        assert_eq!(report.total_amount, 175.0);

        let breakdown_total: f64 = report.category_breakdown.values().map(|c| c.amount).sum();
        assert!((breakdown_total - report.total_amount).abs() < 1e-9);

        for slice in report.category_breakdown.values() {
            assert!(slice.percentage >= 0.0 && slice.percentage <= 100.0);
        }

        let food = &report.category_breakdown[&1];
        assert_eq!(food.count, 1);
        assert!((food.percentage - 100.0 * 100.0 / 175.0).abs() < 1e-9);
    }

    #[test]
    fn monthly_report_of_december_rolls_into_next_year() {
        let db = Database::in_memory().unwrap();
        insert(&db, 10.0, 1, at(2024, 12, 31, 23));
        insert(&db, 99.0, 1, at(2025, 1, 1, 0));

        let report = monthly_report(&db, 12, 2024).unwrap();
        assert_eq!(report.total_amount, 10.0);
    }

    #[test]
    fn monthly_report_groups_dangling_category_ids() {
        let db = Database::in_memory().unwrap();
        // No category with id 42 exists; the breakdown keeps the raw id.
        insert(&db, 5.0, 42, at(2024, 3, 2, 9));

        let report = monthly_report(&db, 3, 2024).unwrap();
        assert!(report.category_breakdown.contains_key(&42));
    }

    #[test]
    fn monthly_report_with_no_expenses_has_zero_percentages() {
        let report = reduce_monthly(3, 2024, &[]);
        assert_eq!(report.total_amount, 0.0);
        assert!(report.category_breakdown.is_empty());
    }

    #[test]
    fn budget_status_joins_breakdown_against_budgets() {
        let db = Database::in_memory().unwrap();
        insert(&db, 80.0, 1, at(2024, 3, 5, 9));
        db.set_budget(&Budget {
            id: 0,
            category_id: 1,
            amount: 100.0,
            month: 3,
            year: 2024,
        })
        .unwrap();
        db.set_budget(&Budget {
            id: 0,
            category_id: 2,
            amount: 50.0,
            month: 3,
            year: 2024,
        })
        .unwrap();

        let statuses = budget_status(&db, 3, 2024).unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].spent, 80.0);
        assert_eq!(statuses[0].remaining, 20.0);
        // Budgeted but unspent category shows the full limit remaining.
        assert_eq!(statuses[1].spent, 0.0);
        assert_eq!(statuses[1].remaining, 50.0);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let db = Database::in_memory().unwrap();
        assert!(monthly_report(&db, 13, 2024).is_err());
    }
}

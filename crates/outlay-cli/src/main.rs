//! Outlay CLI - Offline-first expense tracker
//!
//! Usage:
//!   outlay init                                Initialize database
//!   outlay add --text "spent 250 on groceries" Add a parsed expense
//!   outlay report monthly                      Spending breakdown + budgets
//!   outlay sync                                Upload pending expenses

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            amount,
            category,
            date,
            note,
            text,
        } => {
            let store = commands::build_store(commands::open_db(&cli.db)?);
            commands::cmd_add(
                &store,
                amount,
                category.as_deref(),
                date.as_deref(),
                &note,
                text.as_deref(),
            )
            .await
        }
        Commands::List { category, from, to } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, category.as_deref(), from.as_deref(), to.as_deref())
        }
        Commands::Delete { id } => {
            let store = commands::build_store(commands::open_db(&cli.db)?);
            commands::cmd_delete(&store, id).await
        }
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(CategoriesAction::List) => commands::cmd_categories_list(&db),
                Some(CategoriesAction::Add { name, icon, color }) => {
                    commands::cmd_categories_add(&db, &name, &icon, &color)
                }
                Some(CategoriesAction::Delete { id }) => commands::cmd_categories_delete(&db, id),
                Some(CategoriesAction::Seed) => commands::cmd_categories_seed(&db),
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&db),
                Some(BudgetsAction::Set {
                    category,
                    amount,
                    month,
                    year,
                }) => commands::cmd_budgets_set(&db, &category, amount, month, year),
                Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&db, id),
            }
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&cli.db)?;
            match report_type {
                ReportType::Daily { date } => commands::cmd_report_daily(&db, date.as_deref()),
                ReportType::Monthly { month, year } => {
                    commands::cmd_report_monthly(&db, month, year)
                }
            }
        }
        Commands::Sync => {
            let store = commands::build_store(commands::open_db(&cli.db)?);
            commands::cmd_sync(&store).await
        }
        Commands::Fetch => {
            let store = commands::build_store(commands::open_db(&cli.db)?);
            commands::cmd_fetch(&store).await
        }
    }
}

//! Remote sync command implementations

use anyhow::Result;
use outlay_core::{ExpenseStore, SyncConfig};

pub async fn cmd_sync(store: &ExpenseStore) -> Result<()> {
    let config = SyncConfig::from_env();
    if config.base_url.is_none() {
        println!(
            "💡 No remote configured. Set {} to enable sync.",
            outlay_core::config::SYNC_URL_ENV
        );
        return Ok(());
    }

    println!("🔄 Syncing pending expenses...");
    let outcome = store.sync_pending().await?;

    if outcome.attempted == 0 {
        println!("   Nothing pending (or the remote is unreachable).");
    } else {
        println!(
            "   Attempted: {}  Synced: {}  Failed: {}",
            outcome.attempted, outcome.synced, outcome.failed
        );
    }

    Ok(())
}

pub async fn cmd_fetch(store: &ExpenseStore) -> Result<()> {
    let config = SyncConfig::from_env();
    if config.base_url.is_none() {
        println!(
            "💡 No remote configured. Set {} to enable fetch.",
            outlay_core::config::SYNC_URL_ENV
        );
        return Ok(());
    }

    let documents = store.fetch_remote().await?;
    println!("{}", serde_json::to_string_pretty(&documents)?);
    println!();
    println!("   {} document(s) for user {}", documents.len(), config.user_id);

    Ok(())
}

// ============================================================================
// recall-db — CLI inspection tool for the Recall memory collection
// ============================================================================
// Usage:
//   recall-db list --user USER                 List a user's memories
//   recall-db delete --user USER --memory ID   Delete one memory
//   recall-db export --user USER               Export a user's memories as JSON
//   recall-db health                           Check store connectivity
// ============================================================================

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use recall_core::{AppConfig, MemoryStore};

/// Recall memory collection inspection tool
#[derive(Parser)]
#[command(name = "recall-db", version, about = "Inspect and manage stored question/answer memories")]
struct Cli {
    /// Qdrant endpoint URL (default: from QDRANT_URL or localhost)
    #[arg(long, global = true)]
    qdrant_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List memories stored for a user
    List {
        /// User identifier to scope the listing to
        #[arg(long)]
        user: String,
    },

    /// Delete a single memory owned by a user
    Delete {
        /// User identifier the memory must belong to
        #[arg(long)]
        user: String,

        /// Memory (point) identifier to delete
        #[arg(long)]
        memory: String,
    },

    /// Export a user's memories as JSON
    Export {
        /// User identifier to export
        #[arg(long)]
        user: String,

        /// Output format (currently only json is supported)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Check connectivity to the memory store
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional for a local inspection tool
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = AppConfig::default();
    if let Some(url) = cli.qdrant_url {
        config.qdrant_url = url;
    }

    let store = MemoryStore::new(&config).await?;

    match cli.command {
        Commands::List { user } => cmd_list(&store, &user).await,
        Commands::Delete { user, memory } => cmd_delete(&store, &user, &memory).await,
        Commands::Export { user, format } => cmd_export(&store, &user, &format).await,
        Commands::Health => cmd_health(&store).await,
    }
}

async fn cmd_list(store: &MemoryStore, user: &str) -> Result<()> {
    let memories = store.list_memories(user).await?;

    if memories.is_empty() {
        println!("No memories found for user {}.", user);
        return Ok(());
    }

    println!(
        "{:<36}  {:<20}  {:<12}  {}",
        "MEMORY ID", "COMPANY", "DATE", "QUESTION"
    );
    println!("{}", "-".repeat(100));

    for memory in &memories {
        println!(
            "{:<36}  {:<20}  {:<12}  {}",
            memory.id,
            truncate(&memory.company, 20),
            truncate(&memory.date, 12),
            truncate(&memory.question, 40),
        );
    }

    println!("\nTotal: {} memories", memories.len());
    Ok(())
}

async fn cmd_delete(store: &MemoryStore, user: &str, memory: &str) -> Result<()> {
    store.delete_memory(user, memory).await?;
    println!("Deleted memory {} for user {}.", memory, user);
    Ok(())
}

async fn cmd_export(store: &MemoryStore, user: &str, format: &str) -> Result<()> {
    if format != "json" {
        anyhow::bail!("Unsupported format '{}'. Only 'json' is supported.", format);
    }

    let memories = store.list_memories(user).await?;

    let export = serde_json::json!({
        "exported_at": Utc::now().to_rfc3339(),
        "user": user,
        "count": memories.len(),
        "memories": memories,
    });

    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}

async fn cmd_health(store: &MemoryStore) -> Result<()> {
    if store.health_check().await? {
        println!("Memory store is reachable.");
        Ok(())
    } else {
        anyhow::bail!("Memory store is NOT reachable");
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let shortened: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", shortened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-ten", 11), "exactly-ten");
        let cut = truncate("a very long question indeed", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}

//! Balance Admin CLI
//!
//! Inspect and manage the versioned balance configuration in a file store:
//! seed, show, validate, rate, history, rollback, reset.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::sync::Arc;
#[cfg(feature = "cli")]
use uuid::Uuid;

#[cfg(feature = "cli")]
use alr_core::{
    reset_to_default_config, seed_default_config, BalanceConfigService, ConfigValidator,
    FileConfigStore, GameBalanceConfig, IntegrityCalculator, SeedOutcome, UserProgress,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "alr_cli")]
#[command(about = "Manage ACT Life RPG balance configurations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Store the default configuration if none is active
    Seed {
        /// Store file path
        #[arg(long)]
        store: PathBuf,

        /// User id recorded as the creator
        #[arg(long, default_value = "system")]
        user: String,
    },

    /// Show the active configuration with its record metadata
    Show {
        /// Store file path
        #[arg(long)]
        store: PathBuf,

        /// Print the full record as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Validate a configuration file and list every violation
    Validate {
        /// Configuration JSON file path
        #[arg(long)]
        file: PathBuf,
    },

    /// Compute an Integrity Rating from a progress snapshot
    Rate {
        /// Store file path
        #[arg(long)]
        store: PathBuf,

        /// Progress snapshot JSON file path
        #[arg(long)]
        progress: PathBuf,
    },

    /// Show change history, newest first
    History {
        /// Store file path
        #[arg(long)]
        store: PathBuf,

        /// Configuration id (defaults to the active lineage)
        #[arg(long)]
        config_id: Option<Uuid>,
    },

    /// Restore the configuration captured in a history entry
    Rollback {
        /// Store file path
        #[arg(long)]
        store: PathBuf,

        /// History entry id
        #[arg(long)]
        entry: Uuid,

        /// User id recorded for the rollback
        #[arg(long, default_value = "system")]
        user: String,
    },

    /// Replace the active configuration with the built-in defaults
    Reset {
        /// Store file path
        #[arg(long)]
        store: PathBuf,

        /// User id recorded for the reset
        #[arg(long, default_value = "system")]
        user: String,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { store, user } => {
            let service = open_service(&store)?;
            match seed_default_config(&service, &user)? {
                SeedOutcome::Created(record) => {
                    println!("✅ Default configuration seeded");
                    println!("   Id:      {}", record.id);
                    println!("   Version: {}", record.version);
                }
                SeedOutcome::AlreadyActive => {
                    println!("Active configuration already exists, nothing to do");
                }
            }
        }

        Commands::Show { store, json } => {
            let service = open_service(&store)?;
            match service.active_record()? {
                Some(record) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&record)?);
                    } else {
                        println!("Active configuration {}", record.id);
                        println!("   Version:    {}", record.version);
                        println!("   Created by: {}", record.created_by);
                        println!("   Created at: {}", record.created_at);
                        println!("   Updated at: {}", record.updated_at);
                        println!("{}", serde_json::to_string_pretty(&record.config)?);
                    }
                }
                None => {
                    println!("No active configuration, built-in defaults are in effect");
                }
            }
        }

        Commands::Validate { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let config: GameBalanceConfig = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", file.display()))?;

            match ConfigValidator::validate(&config) {
                Ok(()) => println!("✅ Configuration is valid"),
                Err(err) => {
                    println!("❌ Configuration is invalid:");
                    for issue in &err.issues {
                        println!("   {}: {}", issue.field, issue.message);
                    }
                    anyhow::bail!("{} validation issue(s) found", err.issues.len());
                }
            }
        }

        Commands::Rate { store, progress } => {
            let service = open_service(&store)?;
            let raw = std::fs::read_to_string(&progress)
                .with_context(|| format!("Failed to read {}", progress.display()))?;
            let snapshot: UserProgress = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", progress.display()))?;

            let config = service.get_active_config();
            let breakdown = IntegrityCalculator::integrity_breakdown(&snapshot, &config);

            println!("Integrity Rating: {}", breakdown.total);
            println!("   Path levels: {:+}", breakdown.path_level_contribution);
            println!("   Shadow path: {:+}", breakdown.shadow_path_penalty);
            println!("   Core values: {:+}", breakdown.core_value_contribution);
            println!("   Stats:       {:+}", breakdown.stat_contribution);
        }

        Commands::History { store, config_id } => {
            let service = open_service(&store)?;
            let history = service.get_config_history(config_id)?;

            if history.is_empty() {
                println!("No history entries");
            } else {
                for entry in &history {
                    println!("{}  {}  by {}", entry.id, entry.created_at, entry.changed_by);
                    if let Some(reason) = &entry.change_reason {
                        println!("   Reason: {}", reason);
                    }
                }
            }
        }

        Commands::Rollback { store, entry, user } => {
            let service = open_service(&store)?;
            let record = service.rollback_to_entry(entry, &user)?;
            println!(
                "✅ Rolled back, configuration {} is now version {}",
                record.id, record.version
            );
        }

        Commands::Reset { store, user } => {
            let service = open_service(&store)?;
            let record = reset_to_default_config(&service, &user)?;
            println!(
                "✅ Reset to defaults, configuration {} is now version {}",
                record.id, record.version
            );
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn open_service(path: &PathBuf) -> Result<BalanceConfigService> {
    let store = FileConfigStore::open(path)
        .with_context(|| format!("Failed to open store at {}", path.display()))?;
    Ok(BalanceConfigService::new(Arc::new(store)))
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("alr_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

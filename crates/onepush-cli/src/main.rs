//! OnePush CLI
//!
//! Command-line interface for inspecting and editing OnePush configuration
//! held in a snapshot-backed store

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use onepush_core::keygen::new_app_key;
use onepush_core::{AppEntity, ChannelEntity, ChannelType, FeatureEntity};
use onepush_observability::init_logging;
use onepush_service::{ConfigServices, Consistency};
use onepush_storage::{MemoryHashStore, StoreConfig};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const DEFAULT_SNAPSHOT: &str = "~/.onepush/store.json";

#[derive(Parser)]
#[command(name = "onepush")]
#[command(about = "OnePush - notification configuration store", long_about = None)]
struct Cli {
    /// Configuration file (YAML, or TOML by extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot file backing the store (overrides configuration)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage applications
    #[command(subcommand)]
    App(AppCommand),
    /// Manage channels of an application
    #[command(subcommand)]
    Channel(ChannelCommand),
    /// Manage features of an application channel
    #[command(subcommand)]
    Feature(FeatureCommand),
}

#[derive(Args)]
struct AppRef {
    #[arg(long)]
    account: String,
    #[arg(long)]
    app_key: String,
}

#[derive(Subcommand)]
enum AppCommand {
    /// Create an application with a freshly generated key
    Create {
        #[arg(long)]
        account: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Store an application given as JSON
    Store {
        /// Application JSON
        json: String,
    },
    Load(AppRef),
    List {
        #[arg(long)]
        account: String,
    },
    Remove(AppRef),
    /// Show the account owning an application key
    Owner {
        #[arg(long)]
        app_key: String,
    },
    Exists(AppRef),
    /// Repair the ownership index entry for one application
    Reconcile(AppRef),
}

#[derive(Args)]
struct ChannelRef {
    #[arg(long)]
    app_key: String,
    #[arg(long = "type")]
    channel_type: String,
}

#[derive(Subcommand)]
enum ChannelCommand {
    /// Store a channel given as JSON
    Store {
        /// Channel JSON
        json: String,
    },
    Load(ChannelRef),
    List {
        #[arg(long)]
        app_key: String,
    },
    Remove(ChannelRef),
}

#[derive(Args)]
struct FeatureRef {
    #[arg(long)]
    app_key: String,
    #[arg(long)]
    channel_type: String,
    #[arg(long = "type")]
    feature_type: String,
}

#[derive(Subcommand)]
enum FeatureCommand {
    /// Store a feature given as JSON
    Store {
        /// Feature JSON
        json: String,
    },
    Load(FeatureRef),
    List {
        #[arg(long)]
        app_key: String,
        #[arg(long)]
        channel_type: String,
    },
    Remove(FeatureRef),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let path = shellexpand::tilde(&path.to_string_lossy()).to_string();
            StoreConfig::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path))?
        }
        None => StoreConfig::default(),
    };
    config.merge_env();

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    // Expand tilde in paths
    let snapshot = cli
        .snapshot
        .or_else(|| config.snapshot_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT));
    let snapshot = PathBuf::from(shellexpand::tilde(&snapshot.to_string_lossy()).to_string());

    if let Some(parent) = snapshot.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let store = Arc::new(MemoryHashStore::open(&snapshot).await?);
    let services = ConfigServices::new(store.clone(), &config.namespace);

    let mutated = match cli.command {
        Commands::App(command) => run_app(&services, command).await?,
        Commands::Channel(command) => run_channel(&services, command).await?,
        Commands::Feature(command) => run_feature(&services, command).await?,
    };

    if mutated {
        store.persist().await?;
        info!("Saved {}", snapshot.display());
    }

    Ok(())
}

/// Returns whether the store was modified.
async fn run_app(services: &ConfigServices, command: AppCommand) -> anyhow::Result<bool> {
    let apps = &services.apps;
    match command {
        AppCommand::Create {
            account,
            name,
            description,
        } => {
            let app = AppEntity {
                account,
                app_key: new_app_key(),
                name,
                description,
                ..Default::default()
            };
            apps.store(&app).await?;
            print_json(&app)?;
            Ok(true)
        }
        AppCommand::Store { json } => {
            let app: AppEntity = parse_json(&json)?;
            apps.store(&app).await?;
            Ok(true)
        }
        AppCommand::Load(r) => {
            print_json(&apps.load(&r.account, &r.app_key).await?)?;
            Ok(false)
        }
        AppCommand::List { account } => {
            print_json(&apps.list(&account).await?)?;
            Ok(false)
        }
        AppCommand::Remove(r) => {
            apps.remove(&r.account, &r.app_key).await?;
            Ok(true)
        }
        AppCommand::Owner { app_key } => {
            print_json(&apps.owner(&app_key).await?)?;
            Ok(false)
        }
        AppCommand::Exists(r) => {
            print_json(&apps.presence(&r.account, &r.app_key).await?.is_present())?;
            Ok(false)
        }
        AppCommand::Reconcile(r) => {
            let state = apps.reconcile(&r.account, &r.app_key).await?;
            print_json(&state)?;
            Ok(matches!(
                state,
                Consistency::MissingIndex | Consistency::DanglingIndex
            ))
        }
    }
}

async fn run_channel(services: &ConfigServices, command: ChannelCommand) -> anyhow::Result<bool> {
    let channels = &services.channels;
    match command {
        ChannelCommand::Store { json } => {
            let channel: ChannelEntity = parse_json(&json)?;
            channels.store(&channel).await?;
            Ok(true)
        }
        ChannelCommand::Load(r) => {
            let channel_type = ChannelType::from(r.channel_type);
            print_json(&channels.load(&r.app_key, &channel_type).await?)?;
            Ok(false)
        }
        ChannelCommand::List { app_key } => {
            print_json(&channels.list(&app_key).await?)?;
            Ok(false)
        }
        ChannelCommand::Remove(r) => {
            let channel_type = ChannelType::from(r.channel_type);
            channels.remove(&r.app_key, &channel_type).await?;
            Ok(true)
        }
    }
}

async fn run_feature(services: &ConfigServices, command: FeatureCommand) -> anyhow::Result<bool> {
    let features = &services.features;
    match command {
        FeatureCommand::Store { json } => {
            let feature: FeatureEntity = parse_json(&json)?;
            features.store(&feature).await?;
            Ok(true)
        }
        FeatureCommand::Load(r) => {
            let channel_type = ChannelType::from(r.channel_type);
            print_json(
                &features
                    .load(&r.app_key, &channel_type, &r.feature_type)
                    .await?,
            )?;
            Ok(false)
        }
        FeatureCommand::List {
            app_key,
            channel_type,
        } => {
            let channel_type = ChannelType::from(channel_type);
            print_json(&features.list(&app_key, &channel_type).await?)?;
            Ok(false)
        }
        FeatureCommand::Remove(r) => {
            let channel_type = ChannelType::from(r.channel_type);
            features
                .remove(&r.app_key, &channel_type, &r.feature_type)
                .await?;
            Ok(true)
        }
    }
}

fn parse_json<T: DeserializeOwned>(json: &str) -> anyhow::Result<T> {
    serde_json::from_str(json).context("Invalid entity JSON")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

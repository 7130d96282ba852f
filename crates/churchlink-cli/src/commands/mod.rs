//! CLI command definitions and dispatch.

pub mod config;
pub mod footer;
pub mod header;
pub mod page;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use churchlink_client::ApiClient;
use churchlink_core::config::AppConfig;
use churchlink_core::error::AppError;
use churchlink_entity::store::{NavigationStore, PageStore};
use churchlink_service::{
    LocalizationService, MemoryPageStore, NavigationService, PageService, Snapshot,
};

use crate::output::OutputFormat;

/// ChurchLink: web-builder page and navigation administration
#[derive(Debug, Parser)]
#[command(name = "churchlink", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "churchlink.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Read and write pages, header and footer in a JSON snapshot file
    /// instead of the backend. Translation still goes to the backend.
    #[arg(long, global = true)]
    pub offline: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Page inspection, backfill and publishing
    Page(page::PageArgs),
    /// Header navigation
    Header(header::HeaderArgs),
    /// Footer navigation
    Footer(footer::FooterArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => config::execute(args, &self.config, config, self.format),
            Commands::Page(args) => {
                let runtime = Runtime::build(config, self.offline.as_deref()).await?;
                page::execute(args, &runtime, self.format).await?;
                runtime.persist().await
            }
            Commands::Header(args) => {
                let runtime = Runtime::build(config, self.offline.as_deref()).await?;
                header::execute(args, &runtime, self.format).await?;
                runtime.persist().await
            }
            Commands::Footer(args) => {
                let runtime = Runtime::build(config, self.offline.as_deref()).await?;
                footer::execute(args, &runtime, self.format).await?;
                runtime.persist().await
            }
        }
    }
}

/// Services wired against the backend or an offline snapshot.
pub struct Runtime {
    pub config: AppConfig,
    pub pages: PageService,
    pub navigation: NavigationService,
    offline: Option<(PathBuf, Arc<MemoryPageStore>)>,
}

impl Runtime {
    async fn build(config: AppConfig, offline: Option<&Path>) -> Result<Self, AppError> {
        let client = Arc::new(ApiClient::new(&config.api)?);
        let localization = LocalizationService::new(client.clone(), config.source_locale()?);

        let page_store: Arc<dyn PageStore>;
        let nav_store: Arc<dyn NavigationStore>;
        let mut snapshot_store = None;
        match offline {
            Some(path) => {
                let snapshot = read_snapshot(path).await?;
                let store = Arc::new(MemoryPageStore::from_snapshot(snapshot));
                info!(path = %path.display(), "Using offline snapshot");
                page_store = store.clone();
                nav_store = store.clone();
                snapshot_store = Some((path.to_path_buf(), store));
            }
            None => {
                info!(base_url = %client.base_url(), "Using backend");
                page_store = client.clone();
                nav_store = client;
            }
        }

        Ok(Self {
            pages: PageService::new(
                page_store,
                localization.clone(),
                config.editor.max_undo_steps,
            ),
            navigation: NavigationService::new(nav_store, localization),
            config,
            offline: snapshot_store,
        })
    }

    /// Write the offline snapshot back, if one is in use.
    async fn persist(&self) -> Result<(), AppError> {
        let Some((path, store)) = &self.offline else {
            return Ok(());
        };
        let snapshot = store.snapshot().await;
        write_json(path, &snapshot).await
    }
}

async fn read_snapshot(path: &Path) -> Result<Snapshot, AppError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
            AppError::serialization(format!("Invalid snapshot '{}': {e}", path.display()))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Snapshot::default()),
        Err(e) => Err(e.into()),
    }
}

/// Write `value` as pretty JSON, creating parent directories.
pub async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Ask before a destructive action unless `yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, AppError> {
    if yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

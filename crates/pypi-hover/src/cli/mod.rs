use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use pypi_hover_clients::{CacheSettings, Clients, PackageStore, cache_db_path, settings_path};

mod clear_cache;
mod hover;
mod lookup;

use self::clear_cache::ClearCacheCommand;
use self::hover::HoverCommand;
use self::lookup::LookupCommand;

#[derive(Debug, Parser)]
#[command(name = "pypi-hover", version, about = "PyPI package info for dependency manifests")]
pub struct Cli {
    #[command(subcommand)]
    command: CliCommand,
    /// Maximum number of cached package records (overrides the settings file)
    #[arg(long, global = true, env = "PYPI_HOVER_CACHE_MAX_COUNT")]
    cache_max_count: Option<i64>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    Lookup(LookupCommand),
    Hover(HoverCommand),
    ClearCache(ClearCacheCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let clients = self.build_clients()?;

        match self.command {
            CliCommand::Lookup(cmd) => cmd.run(&clients).await,
            CliCommand::Hover(cmd) => cmd.run(&clients).await,
            CliCommand::ClearCache(cmd) => cmd.run(&clients),
        }
    }

    fn build_clients(&self) -> Result<Clients> {
        let settings = settings_path()
            .map(|path| CacheSettings::load(&path))
            .unwrap_or_default();

        let max_count = self.cache_max_count.unwrap_or(settings.cache_max_count);
        let db_path = cache_db_path().context("failed to resolve the cache directory")?;

        debug!(
            "Using cache database at '{}' with max count {max_count}",
            db_path.display()
        );

        Ok(Clients::new(PackageStore::open(db_path, max_count)))
    }
}

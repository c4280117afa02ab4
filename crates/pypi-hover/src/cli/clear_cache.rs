use anyhow::{Context, Result};
use clap::Parser;

use pypi_hover_clients::Clients;

/// Destroys the entire package metadata cache file.
#[derive(Debug, Clone, Parser)]
pub struct ClearCacheCommand {}

impl ClearCacheCommand {
    pub fn run(self, clients: &Clients) -> Result<()> {
        clients
            .pypi
            .clear_cache()
            .context("failed to clear the package metadata cache")?;

        println!("PyPI package info cache cleared.");

        Ok(())
    }
}

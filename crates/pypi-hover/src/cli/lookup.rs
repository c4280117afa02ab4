use anyhow::{Context, Result};
use clap::Parser;

use pypi_hover_clients::Clients;
use pypi_hover_tools::PackageHover;

/// Fetches and prints package info for one package name.
#[derive(Debug, Clone, Parser)]
pub struct LookupCommand {
    /// The package name to look up
    pub name: String,
    /// Print the shaped record as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl LookupCommand {
    pub async fn run(self, clients: &Clients) -> Result<()> {
        let meta = clients
            .pypi
            .get_package_data(&self.name)
            .await
            .with_context(|| format!("package data fetch failed for \"{}\"", self.name))?;

        let hover = PackageHover::from_metadata(&meta)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&hover)?);
        } else {
            println!("{}", hover.render_markdown());
        }

        Ok(())
    }
}

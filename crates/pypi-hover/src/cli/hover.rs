use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pypi_hover_clients::Clients;
use pypi_hover_parser::{CursorContext, locate};

use super::lookup::LookupCommand;

/**
    Runs the full hover pipeline for a cursor position in a manifest
    file: locate the package name under the cursor, fetch its
    metadata, and print the shaped result.
*/
#[derive(Debug, Clone, Parser)]
pub struct HoverCommand {
    /// Path of the manifest file
    #[arg(long)]
    pub file: PathBuf,
    /// Byte offset of the cursor within the file
    #[arg(long)]
    pub offset: usize,
    /// Print the shaped record as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl HoverCommand {
    pub async fn run(self, clients: &Clients) -> Result<()> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read manifest '{}'", self.file.display()))?;

        let file_name = self.file.to_string_lossy();
        let ctx = CursorContext {
            file_name: file_name.as_ref(),
            text: &text,
            offset: self.offset,
        };

        let Some(name) = locate(&ctx) else {
            info!("No package name at offset {} - nothing to show", self.offset);
            return Ok(());
        };

        let lookup = LookupCommand {
            name,
            json: self.json,
        };

        lookup.run(clients).await
    }
}

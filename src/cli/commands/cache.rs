//! Cache command implementation.
//!
//! Provides `stepline cache list` and `stepline cache clear`.

use clap::{Args, Subcommand};

use crate::cache::ResultCache;
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::setup::EngineSetup;

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// List intermediate results.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Delete intermediate results.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
}

/// The cache command implementation.
pub struct CacheCommand {
    setup: EngineSetup,
    args: CacheArgs,
}

impl CacheCommand {
    pub fn new(setup: EngineSetup, args: CacheArgs) -> Self {
        Self { setup, args }
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cache = ResultCache::new(self.setup.resolve_dirs()?.cache_dir);

        match &self.args.command {
            CacheSubcommand::List { json } => list_cache(&cache, *json, ui)?,
            CacheSubcommand::Clear { force } => clear_cache(&cache, *force, ui)?,
        }

        Ok(CommandResult::success())
    }
}

fn list_cache(cache: &ResultCache, json: bool, ui: &mut dyn UserInterface) -> Result<()> {
    let entries = cache.list()?;

    if json {
        println!("{}", crate::steps::to_json_lossy(&entries));
        return Ok(());
    }

    if entries.is_empty() {
        ui.message("Cache is empty");
        return Ok(());
    }

    ui.message(&format!(
        "{} cached results in {}:\n",
        entries.len(),
        cache.root().display()
    ));
    for entry in &entries {
        let modified = entry
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        ui.message(&format!(
            "  {}  {} bytes  {}",
            entry.file_name, entry.size_bytes, modified
        ));
    }
    ui.message(&format!("\n  Total size: {} bytes", cache.total_size()?));

    Ok(())
}

fn clear_cache(cache: &ResultCache, force: bool, ui: &mut dyn UserInterface) -> Result<()> {
    let entries = cache.list()?;
    if entries.is_empty() {
        ui.message("Cache is already empty");
        return Ok(());
    }

    if !force && ui.is_interactive() {
        let prompt = Prompt::confirm(
            "clear_cache",
            &format!("Clear {} cached results?", entries.len()),
            false,
        );
        if !ui.prompt(&prompt)?.as_bool() {
            ui.message("Cancelled");
            return Ok(());
        }
    }

    let cleared = cache.clear()?;
    ui.success(&format!("Cleared {} cached results", cleared));
    Ok(())
}

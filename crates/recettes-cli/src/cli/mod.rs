//! CLI for the recettes recipe browser.

mod app;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recettes_core::config;
use std::path::PathBuf;

use app::App;
use commands::{run_cache_clear, run_cache_list, run_fetch, run_list, run_show};

/// Top-level CLI for the recettes recipe browser.
#[derive(Debug, Parser)]
#[command(name = "recettes")]
#[command(about = "Recettes: browse African recipes with locally cached images", long_about = None)]
pub struct Cli {
    /// Image cache directory (overrides config.toml).
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List all recipes.
    List {
        /// Print recipes as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one recipe: image, ingredients and steps.
    Show {
        /// Recipe number (as shown by `list`) or name.
        recipe: String,
        /// Print the recipe and its image outcome as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Download images for the given recipes (all when none given).
    Fetch {
        /// Recipe numbers or names.
        recipes: Vec<String>,
    },

    /// Inspect or clear the image cache.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// List cached image files.
    List {
        /// Also print the SHA-256 of each file.
        #[arg(long)]
        checksum: bool,
    },
    /// Delete all cached images.
    Clear,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(dir) = cli.cache_dir {
            cfg.cache_dir = Some(dir);
        }
        tracing::debug!("loaded config: {:?}", cfg);
        let app = App::new(cfg)?;

        match cli.command {
            CliCommand::List { json } => run_list(&app, json)?,
            CliCommand::Show { recipe, json } => run_show(&app, &recipe, json)?,
            CliCommand::Fetch { recipes } => run_fetch(&app, &recipes)?,
            CliCommand::Cache { action } => match action {
                CacheAction::List { checksum } => run_cache_list(&app, checksum)?,
                CacheAction::Clear => run_cache_clear(&app)?,
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

//! Front-end state built once at startup.

use anyhow::{Context, Result};
use recettes_core::config::RecettesConfig;
use recettes_core::recipe::{Recipe, RecipeBook};
use recettes_core::resolver::ImageResolver;
use std::time::Duration;

/// Extra time granted beyond the fetch timeout before giving up on a completion.
const COMPLETION_MARGIN: Duration = Duration::from_secs(5);

/// Everything a view needs: the recipe book and the image resolver.
pub struct App {
    pub book: RecipeBook,
    pub resolver: ImageResolver,
    pub config: RecettesConfig,
}

impl App {
    pub fn new(config: RecettesConfig) -> Result<Self> {
        Self::with_book(RecipeBook::builtin(), config)
    }

    pub fn with_book(book: RecipeBook, config: RecettesConfig) -> Result<Self> {
        let cache_dir = config.resolved_cache_dir()?;
        let resolver = ImageResolver::from_config(&config, &cache_dir)
            .with_context(|| format!("open image cache at {}", cache_dir.display()))?;
        Ok(Self {
            book,
            resolver,
            config,
        })
    }

    /// Looks a recipe up by number or name, with a helpful error.
    pub fn recipe(&self, query: &str) -> Result<(usize, &Recipe)> {
        self.book.find(query).with_context(|| {
            format!(
                "no recipe matching '{}' (use a number 1-{} or a name from `recettes list`)",
                query,
                self.book.len()
            )
        })
    }

    /// How long to wait for outstanding image completions.
    pub fn completion_timeout(&self) -> Duration {
        self.config.fetch_timeout() + COMPLETION_MARGIN
    }
}

//! Image resolver: recipe in, local image file out.
//!
//! Resolution order:
//! 1. cached file at the recipe's derived path → returned as is, no network;
//! 2. one GET into a staged file, renamed into place on success;
//! 3. on any failure, the [`FailurePolicy`]: write a placeholder, or report
//!    the remote URL so the caller can show it directly.
//!
//! Concurrent resolves of the same path share one fetch. The asynchronous
//! contract runs each uncached request on its own thread and delivers the
//! outcome through a [`CompletionQueue`] pumped by the UI thread.

mod flight;
mod queue;

pub use queue::{CompletionQueue, CompletionSender, RequestId};

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::cache::{ImageCache, STALE_TEMP_AGE};
use crate::cache_key::derive_file_name;
use crate::config::{FailurePolicy, PlaceholderConfig, RecettesConfig};
use crate::fetch::{CurlFetcher, FetchOptions, Fetcher};
use crate::placeholder::write_placeholder;
use crate::recipe::Recipe;
use flight::{Flights, Joined};

const STALE_TEMP_MARGIN: Duration = Duration::from_secs(60);

/// What a resolve produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// File was already in the cache; no network access.
    Cached(PathBuf),
    /// File was fetched and stored by this resolve.
    Downloaded(PathBuf),
    /// Fetch failed; a placeholder was stored.
    Placeholder(PathBuf),
    /// No local file. The caller may display `remote_url` directly.
    Unavailable { remote_url: Option<String> },
}

impl ImageOutcome {
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            ImageOutcome::Cached(p) | ImageOutcome::Downloaded(p) | ImageOutcome::Placeholder(p) => {
                Some(p.as_path())
            }
            ImageOutcome::Unavailable { .. } => None,
        }
    }

    pub fn remote_url(&self) -> Option<&str> {
        match self {
            ImageOutcome::Unavailable { remote_url } => remote_url.as_deref(),
            _ => None,
        }
    }

    /// True for the placeholder and unavailable outcomes.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            ImageOutcome::Placeholder(_) | ImageOutcome::Unavailable { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageOutcome::Cached(_) => "cached",
            ImageOutcome::Downloaded(_) => "downloaded",
            ImageOutcome::Placeholder(_) => "placeholder",
            ImageOutcome::Unavailable { .. } => "unavailable",
        }
    }
}

/// Failure handling knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverSettings {
    pub failure_policy: FailurePolicy,
    pub placeholder: PlaceholderConfig,
}

impl ResolverSettings {
    pub fn from_config(cfg: &RecettesConfig) -> Self {
        Self {
            failure_policy: cfg.failure_policy,
            placeholder: cfg.placeholder,
        }
    }
}

struct Inner {
    cache: ImageCache,
    fetcher: Box<dyn Fetcher>,
    settings: ResolverSettings,
    flights: Flights,
}

/// Resolves recipe images to local files. Cheap to clone; clones share the
/// cache, fetcher and in-flight registry.
#[derive(Clone)]
pub struct ImageResolver {
    inner: Arc<Inner>,
}

impl ImageResolver {
    pub fn new<F>(cache: ImageCache, fetcher: F, settings: ResolverSettings) -> Self
    where
        F: Fetcher + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                cache,
                fetcher: Box::new(fetcher),
                settings,
                flights: Flights::default(),
            }),
        }
    }

    /// Resolver backed by libcurl, caching into `cache_dir`.
    ///
    /// Staging files younger than the configured timeouts (plus a margin) are
    /// left alone, since another process may still be writing them.
    pub fn from_config(cfg: &RecettesConfig, cache_dir: &Path) -> Result<Self> {
        let stale_age = (cfg.fetch_timeout() + cfg.connect_timeout() + STALE_TEMP_MARGIN)
            .max(STALE_TEMP_AGE);
        let cache = ImageCache::open_with_stale_age(cache_dir, stale_age)?;
        let fetcher = CurlFetcher::new(FetchOptions::from_config(cfg));
        Ok(Self::new(cache, fetcher, ResolverSettings::from_config(cfg)))
    }

    pub fn cache(&self) -> &ImageCache {
        &self.inner.cache
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.inner.settings
    }

    /// Number of paths with a fetch in progress.
    pub fn in_flight(&self) -> usize {
        self.inner.flights.len()
    }

    /// Cached path for the recipe, without touching the network.
    pub fn cached(&self, recipe: &Recipe) -> Option<PathBuf> {
        self.inner.cache.lookup(&derive_file_name(recipe))
    }

    /// Resolves on the calling thread. Blocks for at most the fetch timeout
    /// (longer only when waiting on another caller's fetch of the same path).
    pub fn resolve(&self, recipe: &Recipe) -> ImageOutcome {
        let dest = self.inner.cache.path_for_recipe(recipe);
        if dest.is_file() {
            tracing::debug!(recipe = %recipe.name, path = %dest.display(), "image cache hit");
            return ImageOutcome::Cached(dest);
        }

        let guard = match self.inner.flights.join(&dest) {
            Joined::Owner(guard) => guard,
            Joined::Waited(outcome) => {
                tracing::debug!(recipe = %recipe.name, outcome = outcome.label(), "joined in-flight fetch");
                return outcome;
            }
        };

        // A flight for this path may have finished between the check and the join.
        let outcome = if dest.is_file() {
            ImageOutcome::Cached(dest)
        } else {
            self.fetch_or_fallback(recipe, dest)
        };
        guard.complete(outcome.clone());
        outcome
    }

    /// Resolves without blocking the caller. `callback` runs on the thread
    /// that pumps `queue`, after the file (if any) is fully in place.
    ///
    /// A cached image is posted straight away; otherwise one worker thread
    /// is spawned for the request.
    pub fn resolve_async<F>(
        &self,
        recipe: &Recipe,
        queue: &mut CompletionQueue,
        callback: F,
    ) -> RequestId
    where
        F: FnOnce(ImageOutcome) + 'static,
    {
        let id = queue.register(callback);
        let sender = queue.sender();

        if let Some(path) = self.cached(recipe) {
            tracing::debug!(recipe = %recipe.name, request = %id, "image cache hit");
            sender.post(id, ImageOutcome::Cached(path));
            return id;
        }

        let resolver = self.clone();
        let owned = recipe.clone();
        let worker_sender = sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("image-fetch-{}", derive_file_name(recipe)))
            .spawn(move || {
                let outcome = resolver.resolve(&owned);
                worker_sender.post(id, outcome);
            });

        if let Err(e) = spawned {
            tracing::warn!(recipe = %recipe.name, "failed to spawn image worker: {}", e);
            sender.post(
                id,
                ImageOutcome::Unavailable {
                    remote_url: recipe.image_url.clone(),
                },
            );
        }
        id
    }

    fn fetch_or_fallback(&self, recipe: &Recipe, dest: PathBuf) -> ImageOutcome {
        let Some(url) = recipe.image_url.as_deref() else {
            tracing::debug!(recipe = %recipe.name, "recipe has no image URL");
            return self.fallback(recipe, &dest);
        };

        match self.inner.fetcher.fetch(url, &dest) {
            Ok(bytes) => {
                tracing::info!(recipe = %recipe.name, url, bytes, path = %dest.display(), "image downloaded");
                ImageOutcome::Downloaded(dest)
            }
            Err(e) => {
                tracing::warn!(
                    recipe = %recipe.name,
                    url,
                    kind = e.kind(),
                    "image download failed: {}",
                    e
                );
                self.fallback(recipe, &dest)
            }
        }
    }

    fn fallback(&self, recipe: &Recipe, dest: &Path) -> ImageOutcome {
        let remote_url = recipe.image_url.clone();
        match self.inner.settings.failure_policy {
            FailurePolicy::Remote => ImageOutcome::Unavailable { remote_url },
            FailurePolicy::Placeholder => {
                match write_placeholder(dest, &self.inner.settings.placeholder) {
                    Ok(path) => {
                        tracing::info!(recipe = %recipe.name, path = %path.display(), "placeholder written");
                        ImageOutcome::Placeholder(path)
                    }
                    Err(e) => {
                        tracing::warn!(recipe = %recipe.name, "failed to write placeholder: {:#}", e);
                        ImageOutcome::Unavailable { remote_url }
                    }
                }
            }
        }
    }
}

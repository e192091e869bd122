use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// What the resolver does when an image cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Write a neutral placeholder image so a local file always exists afterwards.
    #[default]
    Placeholder,
    /// Leave no file; the caller falls back to displaying the remote URL.
    Remote,
}

/// Placeholder image parameters (optional section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    pub width: u32,
    pub height: u32,
    /// Gray level used for all three RGB channels.
    pub gray: u8,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            gray: 200,
        }
    }
}

/// Global configuration loaded from `~/.config/recettes/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecettesConfig {
    /// Image cache directory. None = `~/.cache/recettes/images`.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Total time allowed for one image GET, in seconds.
    pub fetch_timeout_secs: u64,
    /// Time allowed to establish the connection, in seconds.
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Reject downloads whose bytes are not a recognizable image.
    #[serde(default = "default_verify_images")]
    pub verify_images: bool,
    #[serde(default)]
    pub placeholder: PlaceholderConfig,
}

const MIN_TIMEOUT_SECS: u64 = 1;

fn default_verify_images() -> bool {
    true
}

impl Default for RecettesConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            fetch_timeout_secs: 15,
            connect_timeout_secs: 10,
            failure_policy: FailurePolicy::Placeholder,
            verify_images: true,
            placeholder: PlaceholderConfig::default(),
        }
    }
}

impl RecettesConfig {
    /// Whole-transfer limit. Never zero: libcurl reads 0 as "no timeout".
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(MIN_TIMEOUT_SECS))
    }

    /// Connect limit, at least 1 s and never above the fetch timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(MIN_TIMEOUT_SECS))
            .min(self.fetch_timeout())
    }

    /// Cache directory from config, else the XDG cache default.
    pub fn resolved_cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_cache_dir(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("recettes")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

pub fn default_cache_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("recettes")?;
    Ok(xdg_dirs.get_cache_home().join("images"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RecettesConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RecettesConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RecettesConfig = toml::from_str(&data)?;
    Ok(cfg)
}

//! On-disk image cache directory.
//!
//! One file per recipe, named by [`crate::cache_key::derive_file_name`]. A file
//! that exists is valid forever; there is no freshness check.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::cache_key::derive_file_name;
use crate::recipe::Recipe;
use crate::storage::is_temp_path;

const BUF_SIZE: usize = 64 * 1024;

/// Staging files untouched for this long are considered abandoned.
pub const STALE_TEMP_AGE: Duration = Duration::from_secs(10 * 60);

/// A cached image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Handle on the cache directory.
#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    /// Creates the directory if needed and removes staging files left by
    /// interrupted downloads ([`STALE_TEMP_AGE`] or older).
    pub fn open(dir: &Path) -> Result<Self> {
        Self::open_with_stale_age(dir, STALE_TEMP_AGE)
    }

    /// Like [`ImageCache::open`], sweeping only staging files last modified
    /// more than `stale_age` ago. Younger ones may belong to a fetch running
    /// in another process.
    pub fn open_with_stale_age(dir: &Path, stale_age: Duration) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("create cache dir {}", dir.display()))?;
        let cache = Self {
            dir: dir.to_path_buf(),
        };
        let removed = cache.remove_stale_temps(stale_age)?;
        if removed > 0 {
            tracing::info!(dir = %dir.display(), removed, "removed stale temp files");
        }
        Ok(cache)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Cache path for a recipe's image.
    pub fn path_for_recipe(&self, recipe: &Recipe) -> PathBuf {
        self.path_for(&derive_file_name(recipe))
    }

    /// Path of the cached file, if one exists.
    pub fn lookup(&self, file_name: &str) -> Option<PathBuf> {
        let path = self.path_for(file_name);
        path.is_file().then_some(path)
    }

    /// All cached images, sorted by name. Staging files are skipped.
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("read cache dir {}", self.dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            let meta = entry.metadata()?;
            if !meta.is_file() || is_temp_path(&path) {
                continue;
            }
            out.push(CacheEntry {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                path,
                size: meta.len(),
            });
        }
        out.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(out)
    }

    /// Removes one cached file. Returns false if it was not cached.
    pub fn remove(&self, file_name: &str) -> Result<bool> {
        match self.lookup(file_name) {
            Some(path) => {
                fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes every cached image. Returns how many files were deleted.
    pub fn clear(&self) -> Result<usize> {
        let entries = self.entries()?;
        for e in &entries {
            fs::remove_file(&e.path).with_context(|| format!("remove {}", e.path.display()))?;
        }
        tracing::info!(dir = %self.dir.display(), removed = entries.len(), "cache cleared");
        Ok(entries.len())
    }

    /// SHA-256 of a cached file as lowercase hex.
    pub fn checksum(&self, entry: &CacheEntry) -> Result<String> {
        sha256_path(&entry.path)
    }

    fn remove_stale_temps(&self, stale_age: Duration) -> Result<usize> {
        let now = SystemTime::now();
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let meta = entry.metadata()?;
            if !meta.is_file() || !is_temp_path(&path) {
                continue;
            }
            // Unknown mtime or one in the future: leave it alone.
            let age = meta
                .modified()
                .ok()
                .and_then(|m| now.duration_since(m).ok());
            if !age.is_some_and(|a| a >= stale_age) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                // Finalized or cleaned up by its owner in the meantime.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("remove {}", path.display()));
                }
            }
        }
        Ok(removed)
    }
}

/// Compute SHA-256 of a file and return the digest as lowercase hex.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

//! Single-attempt HTTP GET of an image into the cache.
//!
//! Uses the curl crate (libcurl). The body is streamed into a staged `.tmp`
//! file that is renamed onto the destination only after the transfer, status
//! and content checks all pass. No retries.

mod error;
mod verify;

pub use error::FetchError;
pub use verify::check_image;

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::config::RecettesConfig;
use crate::storage::StagedFile;

const USER_AGENT: &str = concat!("recettes/", env!("CARGO_PKG_VERSION"));

/// Per-request limits and checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Whole-transfer timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Reject bodies that are not a recognizable image.
    pub verify_images: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_config(&RecettesConfig::default())
    }
}

impl FetchOptions {
    pub fn from_config(cfg: &RecettesConfig) -> Self {
        Self {
            timeout: cfg.fetch_timeout(),
            connect_timeout: cfg.connect_timeout(),
            verify_images: cfg.verify_images,
        }
    }
}

/// Something that can put the bytes behind `url` at `dest`, atomically.
///
/// The resolver depends only on this trait; [`CurlFetcher`] is the real one.
pub trait Fetcher: Send + Sync {
    /// Returns the number of bytes stored at `dest`.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

/// libcurl-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        fetch_to_path(url, dest, &self.options)
    }
}

/// Downloads `url` with one GET and atomically stores it at `dest`.
/// Runs in the current thread.
pub fn fetch_to_path(url: &str, dest: &Path, opts: &FetchOptions) -> Result<u64, FetchError> {
    let mut staged = StagedFile::create(dest).map_err(FetchError::Storage)?;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(USER_AGENT)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    let mut write_err: Option<io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match staged.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(FetchError::Storage(
            anyhow::Error::new(e).context("write to temp file"),
        ));
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    let written = staged.bytes_written();
    if written == 0 {
        return Err(FetchError::EmptyBody);
    }

    staged.flush().map_err(|e| FetchError::Storage(e.into()))?;
    if opts.verify_images {
        let (w, h) = check_image(staged.temp_path())?;
        tracing::trace!(url, width = w, height = h, "downloaded image verified");
    }

    staged.finalize().map_err(FetchError::Storage)?;
    Ok(written)
}

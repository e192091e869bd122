//! Fetch error taxonomy.

/// Why a single image GET did not produce a cached file.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, connection, TLS, ...).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating, writing or renaming the staged file failed.
    #[error("storage: {0:#}")]
    Storage(anyhow::Error),
    /// Server answered 2xx with no body.
    #[error("empty response body")]
    EmptyBody,
    /// Body was downloaded but is not a recognizable image.
    #[error("not an image: {0}")]
    NotImage(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_operation_timedout())
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(e) if e.is_operation_timedout() => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::Http(_) => "http",
            FetchError::Storage(_) => "storage",
            FetchError::EmptyBody => "empty",
            FetchError::NotImage(_) => "not_image",
        }
    }
}

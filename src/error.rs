use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the analysis core: loading config, reading or fetching
/// pages. Analysis itself never fails.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },
}

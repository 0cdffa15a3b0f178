//! Error types shared by the post-processing passes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a [`crate::config::ProcessorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: io::Error,
  },
  /// Failed to parse the JSON configuration file.
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
  /// The configured base URL is not an absolute URL.
  #[error("invalid base URL `{value}`: {source}")]
  InvalidBaseUrl {
    /// Raw configured value.
    value: String,
    /// Source parse error.
    #[source]
    source: url::ParseError,
  },
}

/// Errors produced by an [`crate::fetch::AssetFetcher`].
#[derive(Debug, Error)]
pub enum FetchError {
  /// The request could not be sent or the body could not be read.
  #[error("request to {url} failed: {message}")]
  Transport {
    /// Requested URL.
    url: String,
    /// Transport level description.
    message: String,
  },
  /// The server answered with a non-success status.
  #[error("request to {url} returned status {status}")]
  Status {
    /// Requested URL.
    url: String,
    /// HTTP status code.
    status: u16,
  },
}

/// Errors aborting the embedded asset pass of one document.
#[derive(Debug, Error)]
pub enum ExtractError {
  /// Fetching a referenced asset failed.
  #[error(transparent)]
  Fetch(#[from] FetchError),
  /// The asset path could not be resolved against the document URL.
  #[error("cannot resolve `{path}` against {document}: {source}")]
  Join {
    /// Matched site path.
    path: String,
    /// Document URL.
    document: String,
    /// Source parse error.
    #[source]
    source: url::ParseError,
  },
  /// The asset response carried no usable content type.
  #[error("no file extension can be derived for {url} (content type: {content_type:?})")]
  UnknownExtension {
    /// Asset URL.
    url: String,
    /// Declared content type, if any.
    content_type: Option<String>,
  },
  /// Writing the asset or serialising the document failed.
  #[error("failed to write {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: io::Error,
  },
}

/// Errors raised while prettifying links in a saved HTML file.
#[derive(Debug, Error)]
pub enum PrettifyError {
  /// Reading, serialising or writing the file failed.
  #[error("failed to rewrite {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: io::Error,
  },
}

/// Failure of one of the host-facing hooks.
#[derive(Debug, Error)]
pub enum HookError {
  /// The embedded asset pass for a document failed.
  #[error("embedded asset pass failed: {0}")]
  Extract(#[from] ExtractError),
  /// The post-write link pass failed.
  #[error("link prettifying failed: {0}")]
  Prettify(#[from] PrettifyError),
}

//! HTTP client seam used to download embedded assets.

use std::future::Future;

use url::Url;

use crate::error::FetchError;
use crate::models::FetchedAsset;

/// Asynchronous HTTP client abstraction.
///
/// Implementations own their redirect, timeout and TLS policy. A non-success status must
/// be reported as [`FetchError::Status`] rather than returned as a body.
///
/// # Implementations
///
/// - [`ReqwestFetcher`]: production implementation using `reqwest`
/// - In-memory stubs for testing
pub trait AssetFetcher: Send + Sync {
  /// Fetch the bytes and declared content type at `url`.
  fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedAsset, FetchError>> + Send;
}

/// Production fetcher backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
  client: reqwest::Client,
}

impl ReqwestFetcher {
  /// Create a fetcher with default client configuration.
  pub fn new() -> Self {
    Self::default()
  }

  /// Wrap an existing client, e.g. one configured with a timeout by the host engine.
  pub fn with_client(client: reqwest::Client) -> Self {
    Self { client }
  }
}

impl AssetFetcher for ReqwestFetcher {
  async fn fetch(&self, url: &Url) -> Result<FetchedAsset, FetchError> {
    let transport = |err: reqwest::Error| FetchError::Transport {
      url: url.to_string(),
      message: err.to_string(),
    };

    let response = self
      .client
      .get(url.clone())
      .send()
      .await
      .map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status {
        url: url.to_string(),
        status: status.as_u16(),
      });
    }

    let content_type = response
      .headers()
      .get(reqwest::header::CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .map(str::to_string);
    let body = response.bytes().await.map_err(transport)?.to_vec();

    Ok(FetchedAsset { content_type, body })
  }
}

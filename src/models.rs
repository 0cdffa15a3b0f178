//! Data structures exchanged with the mirroring engine.

use std::path::{Path, PathBuf};

use url::Url;

use crate::site::join_output_path;

/// A resource discovered by the mirroring engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
  /// Absolute URL the resource is fetched from.
  pub source_url: Url,
  /// Whether the engine expects the resource to be an HTML document.
  pub is_html_hint: bool,
  /// Declared MIME type of the response, once it is known.
  pub response_mime_type: Option<String>,
}

impl ResourceDescriptor {
  /// Describe a resource that has not been fetched yet.
  pub fn new(source_url: Url, is_html_hint: bool) -> Self {
    Self {
      source_url,
      is_html_hint,
      response_mime_type: None,
    }
  }

  /// Attach the MIME type declared by the response.
  pub fn with_response_mime(mut self, mime_type: impl Into<String>) -> Self {
    self.response_mime_type = Some(mime_type.into());
    self
  }
}

/// Output-relative location chosen for a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPlan {
  /// Relative path using `/` separators, never escaping the output root.
  pub output_relative_path: String,
}

impl PathPlan {
  /// Whether the planned file is an HTML document that gets a link pass after saving.
  pub fn is_html_document(&self) -> bool {
    self.output_relative_path.ends_with(".html")
  }

  /// Join the plan onto an output root using native separators.
  pub fn resolve(&self, output_root: &Path) -> PathBuf {
    join_output_path(output_root, &self.output_relative_path)
  }
}

/// One embedded asset resolved while processing a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedAssetReference {
  /// Site-absolute path as it appeared in the attribute text.
  pub original_path_fragment: String,
  /// Site-absolute path of the materialised file.
  pub resolved_local_path: String,
}

/// A completed HTTP response handed to [`crate::hooks::MirrorHooks::after_response`].
#[derive(Debug, Clone)]
pub struct MirrorResponse {
  /// URL the response was fetched from.
  pub url: Url,
  /// HTTP status code.
  pub status: u16,
  /// Value of the `content-type` header.
  pub content_type: Option<String>,
  /// Response body.
  pub body: Vec<u8>,
}

impl MirrorResponse {
  /// Whether the declared content type marks the body as HTML.
  pub fn is_html(&self) -> bool {
    self
      .content_type
      .as_deref()
      .is_some_and(|value| value.starts_with("text/html"))
  }
}

/// Bytes and metadata of a fetched embedded asset.
#[derive(Debug, Clone)]
pub struct FetchedAsset {
  /// Declared `content-type` of the asset.
  pub content_type: Option<String>,
  /// Asset body.
  pub body: Vec<u8>,
}

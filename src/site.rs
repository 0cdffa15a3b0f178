//! Site and output-tree description captured by every pass at construction.

use std::path::{Path, PathBuf};

use url::Url;

/// Owned description of the mirrored site and where its files land.
#[derive(Debug, Clone)]
pub struct SiteContext {
  /// Parsed base URL of the mirrored site.
  pub base_url: Url,
  /// Base URL exactly as configured, used for textual prefix checks on hrefs.
  pub base_url_text: String,
  /// Directory the mirrored site is written to.
  pub output_root: PathBuf,
  /// Placeholder extension (without the dot) of server-generated assets.
  pub dynamic_asset_suffix: String,
  /// Initialisation attributes scanned for embedded assets, in priority order.
  pub init_attributes: Vec<String>,
  /// Document name used for the site root and directory paths.
  pub index_document: String,
}

impl SiteContext {
  /// Build a context with the default suffix, attributes and index document.
  pub fn new(base_url: Url, output_root: impl Into<PathBuf>) -> Self {
    Self {
      base_url_text: base_url.as_str().to_string(),
      base_url,
      output_root: output_root.into(),
      dynamic_asset_suffix: "ashx".into(),
      init_attributes: vec!["data-ng-init".into(), "ng-init".into()],
      index_document: "index.html".into(),
    }
  }

  /// The dynamic asset suffix including its leading dot, e.g. `.ashx`.
  pub fn dotted_suffix(&self) -> String {
    format!(".{}", self.dynamic_asset_suffix)
  }

  /// Resolve an output-relative path (with or without a leading `/`) under the output root.
  pub fn output_path(&self, relative: &str) -> PathBuf {
    join_output_path(&self.output_root, relative)
  }
}

/// Join a `/`-separated relative path onto `root` using native separators.
///
/// Empty, `.` and `..` segments are skipped so the result never leaves the root.
pub fn join_output_path(root: &Path, relative: &str) -> PathBuf {
  let mut path = root.to_path_buf();
  for segment in relative
    .split('/')
    .filter(|segment| !matches!(*segment, "" | "." | ".."))
  {
    path.push(segment);
  }
  path
}

//! Processor configuration loader describing the mirrored site and its output tree.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::site::SiteContext;

/// File name searched for by [`ProcessorConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "mirror.config.json";

/// Discoverable configuration describing the mirrored site and the output layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
  /// Absolute URL of the site being mirrored, used to recognise same-site links.
  pub base_url: String,
  /// Directory the mirrored site is written to.
  pub output_root: PathBuf,
  /// Placeholder extension marking server-generated assets of unknown type.
  pub dynamic_asset_suffix: String,
  /// Initialisation attributes scanned for embedded assets, in priority order.
  pub init_attributes: Vec<String>,
  /// Document name used for the site root and directory paths.
  pub index_document: String,
}

impl Default for ProcessorConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost/".into(),
      output_root: PathBuf::from("out"),
      dynamic_asset_suffix: "ashx".into(),
      init_attributes: vec!["data-ng-init".into(), "ng-init".into()],
      index_document: "index.html".into(),
    }
  }
}

impl ProcessorConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unparsable file yields the default configuration.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file, ignoring failures.
  pub fn from_path(path: &Path) -> Option<Self> {
    Self::load(path).ok()
  }

  /// Read configuration from a specific JSON file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Validate the configuration and convert it into the context shared by every pass.
  pub fn into_site(self) -> Result<SiteContext, ConfigError> {
    let base_url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
      value: self.base_url.clone(),
      source,
    })?;

    let init_attributes = if self.init_attributes.is_empty() {
      Self::default().init_attributes
    } else {
      self.init_attributes
    };

    Ok(SiteContext {
      base_url,
      base_url_text: self.base_url,
      output_root: self.output_root,
      dynamic_asset_suffix: self.dynamic_asset_suffix.trim_start_matches('.').to_string(),
      init_attributes,
      index_document: self.index_document,
    })
  }
}

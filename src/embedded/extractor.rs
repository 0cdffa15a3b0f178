//! Downloads assets referenced from initialisation attributes and rewrites the references.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;
use regex::Regex;
use tracing::{debug, info};
use url::Url;

use super::scan::{
  AttributeRewrite, apply_rewrites, asset_path_pattern, scan_document, substitute_asset_paths,
};
use crate::error::ExtractError;
use crate::fetch::AssetFetcher;
use crate::models::EmbeddedAssetReference;
use crate::naming::extension_for_mime;
use crate::site::SiteContext;

/// Materialises server-generated assets referenced from HTML initialisation attributes.
pub struct EmbeddedAssetExtractor<F> {
  fetcher: F,
  site: SiteContext,
  dotted_suffix: String,
  pattern: Regex,
}

impl<F: AssetFetcher> EmbeddedAssetExtractor<F> {
  /// Create an extractor writing under the site's output root.
  pub fn new(site: &SiteContext, fetcher: F) -> Self {
    Self {
      fetcher,
      pattern: asset_path_pattern(&site.dynamic_asset_suffix),
      dotted_suffix: site.dotted_suffix(),
      site: site.clone(),
    }
  }

  /// Borrow the underlying fetcher.
  pub fn fetcher(&self) -> &F {
    &self.fetcher
  }

  /// Process one HTML payload fetched from `document_url`.
  ///
  /// Every distinct asset path found in the initialisation attributes of the document is
  /// fetched once, written under the output root with an extension derived from its content
  /// type and replaced in every attribute that mentions it. All fetches of the document run concurrently and the rewritten
  /// markup is produced only after every one of them succeeded. A payload without asset
  /// references is returned unchanged.
  pub async fn process(&self, html: &[u8], document_url: &Url) -> Result<Vec<u8>, ExtractError> {
    let text = String::from_utf8_lossy(html);
    info!("Looking for initialisation attributes in {document_url}");

    let scans = scan_document(&text, &self.site.init_attributes, &self.pattern);
    if scans.is_empty() {
      return Ok(html.to_vec());
    }

    let mut seen = HashSet::new();
    let paths: Vec<&str> = scans
      .iter()
      .flat_map(|scan| scan.paths.iter().map(String::as_str))
      .filter(|path| seen.insert(*path))
      .collect();

    let references = try_join_all(
      paths
        .iter()
        .map(|path| self.materialise(path, document_url)),
    )
    .await?;

    let replacements: HashMap<&str, &str> = references
      .iter()
      .map(|reference| {
        (
          reference.original_path_fragment.as_str(),
          reference.resolved_local_path.as_str(),
        )
      })
      .collect();

    let rewrites: Vec<AttributeRewrite> = scans
      .iter()
      .map(|scan| AttributeRewrite {
        element_index: scan.element_index,
        attribute: scan.attribute.clone(),
        value: substitute_asset_paths(&self.pattern, &scan.text, &replacements),
      })
      .collect();

    apply_rewrites(&text, &self.site.init_attributes, &rewrites).map_err(|source| {
      ExtractError::Io {
        path: document_url.path().into(),
        source,
      }
    })
  }

  async fn materialise(
    &self,
    path: &str,
    document_url: &Url,
  ) -> Result<EmbeddedAssetReference, ExtractError> {
    let origin = document_url.origin().ascii_serialization();
    let asset_url = Url::parse(&format!("{origin}{path}")).map_err(|source| ExtractError::Join {
      path: path.to_string(),
      document: document_url.to_string(),
      source,
    })?;

    info!("Downloading {path} for {document_url}");
    let asset = self.fetcher.fetch(&asset_url).await?;

    let extension = asset
      .content_type
      .as_deref()
      .and_then(extension_for_mime)
      .ok_or_else(|| ExtractError::UnknownExtension {
        url: asset_url.to_string(),
        content_type: asset.content_type.clone(),
      })?;

    let local_path = self.local_path(path, &extension);
    let target = self.site.output_path(&local_path);
    let io_error = |source| ExtractError::Io {
      path: target.clone(),
      source,
    };

    if let Some(parent) = target.parent() {
      tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(&target, &asset.body)
      .await
      .map_err(io_error)?;
    debug!("{asset_url} --> {}", target.display());

    Ok(EmbeddedAssetReference {
      original_path_fragment: path.to_string(),
      resolved_local_path: local_path.into_owned(),
    })
  }

  /// Swap the dynamic asset suffix of `path` for `extension`.
  fn local_path<'p>(&self, path: &'p str, extension: &str) -> Cow<'p, str> {
    match path.strip_suffix(&self.dotted_suffix) {
      Some(stem) => Cow::Owned(format!("{stem}.{extension}")),
      None => Cow::Borrowed(path),
    }
  }
}

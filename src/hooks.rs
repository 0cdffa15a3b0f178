//! Capability set called by the mirroring engine around each resource.

use std::future::Future;

use tracing::error;

use crate::embedded::EmbeddedAssetExtractor;
use crate::error::HookError;
use crate::fetch::AssetFetcher;
use crate::links::LinkPrettifier;
use crate::models::{MirrorResponse, PathPlan, ResourceDescriptor};
use crate::naming::FilenameMapper;
use crate::site::SiteContext;

/// Status code of responses that are dropped instead of saved.
pub const NOT_FOUND: u16 = 404;

/// Extension points a mirroring engine calls while it crawls and saves a site.
pub trait MirrorHooks {
  /// Name the file a discovered resource is saved to.
  fn generate_filename(&self, resource: &ResourceDescriptor) -> PathPlan;

  /// Inspect a completed fetch; `None` tells the engine to discard the resource.
  fn after_response(
    &self,
    response: MirrorResponse,
  ) -> impl Future<Output = Result<Option<MirrorResponse>, HookError>> + Send;

  /// Run post-write processing for a file the engine has just saved.
  fn on_resource_saved(&self, saved: &PathPlan) -> Result<(), HookError>;

  /// Record an engine-level fetch error.
  fn error(&self, error: &(dyn std::error::Error + 'static));
}

/// Default [`MirrorHooks`] implementation wiring the three passes together.
pub struct MirrorProcessor<F> {
  site: SiteContext,
  mapper: FilenameMapper,
  extractor: EmbeddedAssetExtractor<F>,
  prettifier: LinkPrettifier,
}

impl<F: AssetFetcher> MirrorProcessor<F> {
  /// Build the processor for a site, using `fetcher` for embedded assets.
  pub fn new(site: SiteContext, fetcher: F) -> Self {
    Self {
      mapper: FilenameMapper::new(&site),
      extractor: EmbeddedAssetExtractor::new(&site, fetcher),
      prettifier: LinkPrettifier::new(&site),
      site,
    }
  }

  /// Embedded asset pass used by [`MirrorHooks::after_response`].
  pub fn extractor(&self) -> &EmbeddedAssetExtractor<F> {
    &self.extractor
  }
}

impl<F: AssetFetcher> MirrorHooks for MirrorProcessor<F> {
  fn generate_filename(&self, resource: &ResourceDescriptor) -> PathPlan {
    self.mapper.plan(resource)
  }

  async fn after_response(
    &self,
    mut response: MirrorResponse,
  ) -> Result<Option<MirrorResponse>, HookError> {
    if response.status == NOT_FOUND {
      return Ok(None);
    }

    if response.is_html() {
      response.body = self
        .extractor
        .process(&response.body, &response.url)
        .await?;
    }
    Ok(Some(response))
  }

  fn on_resource_saved(&self, saved: &PathPlan) -> Result<(), HookError> {
    if saved.is_html_document() {
      let file = saved.resolve(&self.site.output_root);
      self.prettifier.rewrite(&file)?;
    }
    Ok(())
  }

  fn error(&self, error: &(dyn std::error::Error + 'static)) {
    error!("{error}");
  }
}

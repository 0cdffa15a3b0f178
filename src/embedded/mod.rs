//! Materialisation of assets referenced from inline application-initialisation attributes.
//!
//! Pages built on client-side frameworks sometimes pass server-generated handler URLs to
//! the application through an initialisation attribute instead of a regular `src`/`href`.
//! The crawler never sees those references, so this pass finds them, downloads the assets
//! and points the attribute at the saved copies.

mod extractor;
mod scan;

pub use extractor::EmbeddedAssetExtractor;
pub use scan::{
  AttributeRewrite, AttributeScan, apply_rewrites, asset_path_pattern, find_asset_paths,
  scan_document, substitute_asset_paths,
};

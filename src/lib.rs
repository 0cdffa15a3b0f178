#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod embedded;
pub mod error;
pub mod fetch;
pub mod hooks;
pub mod links;
pub mod logging;
pub mod models;
pub mod naming;
pub mod site;

pub use config::ProcessorConfig;
pub use embedded::EmbeddedAssetExtractor;
pub use error::{ConfigError, ExtractError, FetchError, HookError, PrettifyError};
pub use fetch::{AssetFetcher, ReqwestFetcher};
pub use hooks::{MirrorHooks, MirrorProcessor};
pub use links::LinkPrettifier;
pub use models::{EmbeddedAssetReference, MirrorResponse, PathPlan, ResourceDescriptor};
pub use naming::FilenameMapper;
pub use site::SiteContext;

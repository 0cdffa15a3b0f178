//! Command line surface over the post-processing passes.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mirror_postprocess::config::ProcessorConfig;
use mirror_postprocess::embedded::EmbeddedAssetExtractor;
use mirror_postprocess::fetch::ReqwestFetcher;
use mirror_postprocess::links::LinkPrettifier;
use mirror_postprocess::naming::{FilenameMapper, fingerprint};
use mirror_postprocess::site::SiteContext;
use url::Url;

/// Post-process a mirrored website.
#[derive(Debug, Parser)]
#[command(name = "mirror-postprocess")]
#[command(about = "Name, materialise and prettify files of a mirrored website", long_about = None)]
pub struct Cli {
  /// JSON configuration file; `mirror.config.json` in the working directory is used otherwise.
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the mirrored site (overrides the configuration).
  #[arg(long, global = true, value_name = "URL")]
  base_url: Option<String>,

  /// Output root of the mirror (overrides the configuration).
  #[arg(short, long, global = true, value_name = "DIR")]
  output: Option<PathBuf>,

  /// Only log warnings and errors.
  #[arg(short, long, global = true)]
  pub quiet: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print the output-relative path a URL is saved to.
  Plan {
    /// Absolute resource URL.
    url: String,
    /// Treat the resource as an HTML document.
    #[arg(long)]
    html: bool,
    /// MIME type declared by the response.
    #[arg(long, value_name = "TYPE")]
    mime: Option<String>,
  },

  /// Print the query/fragment fingerprint of a URL.
  Fingerprint {
    /// Absolute resource URL.
    url: String,
  },

  /// Download assets referenced by initialisation attributes of a saved HTML file.
  Extract {
    /// Saved HTML file, rewritten in place.
    file: PathBuf,
    /// URL the document was fetched from.
    #[arg(long, value_name = "URL")]
    url: String,
  },

  /// Drop `.html` from same-site links of one file, or of every file under the output root.
  Prettify {
    /// Single HTML file to rewrite.
    file: Option<PathBuf>,
  },
}

impl Cli {
  /// Parse the process arguments.
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Execute the selected command.
  pub async fn run(self) -> Result<()> {
    let site = self.site()?;
    tracing::debug!("site context: {:?}", site);

    match self.command {
      Command::Plan { url, html, mime } => {
        let url = parse_url(&url)?;
        let plan = FilenameMapper::new(&site).plan_url(&url, html, mime.as_deref());
        println!("{}", plan.output_relative_path);
      }
      Command::Fingerprint { url } => {
        println!("{}", fingerprint(&parse_url(&url)?));
      }
      Command::Extract { file, url } => {
        let document_url = parse_url(&url)?;
        let html = tokio::fs::read(&file)
          .await
          .with_context(|| format!("failed to read {}", file.display()))?;
        let extractor = EmbeddedAssetExtractor::new(&site, ReqwestFetcher::new());
        let output = extractor
          .process(&html, &document_url)
          .await
          .with_context(|| format!("embedded asset pass failed for {}", file.display()))?;
        tokio::fs::write(&file, output)
          .await
          .with_context(|| format!("failed to write {}", file.display()))?;
      }
      Command::Prettify { file } => {
        let prettifier = LinkPrettifier::new(&site);
        match file {
          Some(file) => prettifier.rewrite(&file)?,
          None => {
            let count = prettifier.rewrite_tree(&site.output_root)?;
            tracing::info!("prettified {count} files under {}", site.output_root.display());
          }
        }
      }
    }

    Ok(())
  }

  fn site(&self) -> Result<SiteContext> {
    let mut config = match &self.config {
      Some(path) => ProcessorConfig::load(path)?,
      None => ProcessorConfig::discover(&env::current_dir()?),
    };

    if let Some(base_url) = &self.base_url {
      config.base_url = base_url.clone();
    }
    if let Some(output) = &self.output {
      config.output_root = output.clone();
    }

    Ok(config.into_site()?)
  }
}

fn parse_url(value: &str) -> Result<Url> {
  Url::parse(value).with_context(|| format!("`{value}` is not an absolute URL"))
}

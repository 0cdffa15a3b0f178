//! Post-write pass turning same-site anchors of saved HTML files into pretty links.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use kuchikiki::traits::*;
use tracing::{debug, info};

use crate::error::PrettifyError;
use crate::site::SiteContext;

const HTML_EXTENSION: &str = ".html";

/// Rewrites same-site anchors so they drop the `.html` extension.
#[derive(Debug, Clone)]
pub struct LinkPrettifier {
  base_url: String,
  index_document: String,
}

impl LinkPrettifier {
  /// Capture the base URL and index document of the site.
  pub fn new(site: &SiteContext) -> Self {
    Self {
      base_url: site.base_url_text.clone(),
      index_document: site.index_document.clone(),
    }
  }

  /// Prettify the links of one saved HTML file, overwriting it in place.
  pub fn rewrite(&self, file_path: &Path) -> Result<(), PrettifyError> {
    info!("{} > Removing html extension on internal links", file_path.display());
    let io_error = |source| PrettifyError::Io {
      path: file_path.to_path_buf(),
      source,
    };

    let html = fs::read_to_string(file_path).map_err(io_error)?;
    let (output, changed) = self.prettify_html(&html).map_err(io_error)?;
    fs::write(file_path, output).map_err(io_error)?;

    debug!("{}: {changed} links rewritten", file_path.display());
    Ok(())
  }

  /// Prettify every `.html` file below `root`, returning how many files were rewritten.
  pub fn rewrite_tree(&self, root: &Path) -> Result<usize, PrettifyError> {
    let mut files = Vec::new();
    collect_html_files(root, &mut files).map_err(|source| PrettifyError::Io {
      path: root.to_path_buf(),
      source,
    })?;
    files.sort();

    for file in &files {
      self.rewrite(file)?;
    }
    Ok(files.len())
  }

  /// Prettify the anchors of an HTML string, returning the serialised markup and the number
  /// of `href` attributes that changed.
  pub fn prettify_html(&self, html: &str) -> io::Result<(Vec<u8>, usize)> {
    let document = kuchikiki::parse_html().one(html);
    let mut changed = 0;

    for anchor in document
      .descendants()
      .elements()
      .filter(|element| &*element.name.local == "a")
    {
      let mut attributes = anchor.attributes.borrow_mut();
      let Some(href) = attributes.get("href") else {
        continue;
      };
      if href.is_empty() || !self.is_site_link(href) {
        continue;
      }

      if let Some(pretty) = prettify_href(href, &self.index_document) {
        attributes.insert("href", pretty);
        changed += 1;
      }
    }

    let mut bytes = Vec::new();
    document.serialize(&mut bytes)?;
    Ok((bytes, changed))
  }

  /// Relative or site-local hrefs, plus absolute hrefs under the base URL.
  fn is_site_link(&self, href: &str) -> bool {
    let external = href.starts_with("http") || href.starts_with("//");
    !external || href.starts_with(&self.base_url)
  }
}

/// Compute the pretty form of an href, or `None` when it stays as is.
///
/// The index document becomes `/` and a trailing `.html` (any case) is removed.
pub fn prettify_href(href: &str, index_document: &str) -> Option<String> {
  if href == index_document {
    return Some("/".to_string());
  }
  strip_html_extension(href).map(str::to_string)
}

fn strip_html_extension(href: &str) -> Option<&str> {
  let split = href.len().checked_sub(HTML_EXTENSION.len())?;
  let tail = href.get(split..)?;
  tail
    .eq_ignore_ascii_case(HTML_EXTENSION)
    .then(|| &href[..split])
}

fn collect_html_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    let path = entry.path();
    if entry.file_type()?.is_dir() {
      collect_html_files(&path, files)?;
    } else if path
      .extension()
      .is_some_and(|extension| extension == "html")
    {
      files.push(path);
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;
  use url::Url;

  fn prettifier() -> LinkPrettifier {
    let site = SiteContext::new(Url::parse("https://www.example.dk/").unwrap(), "out");
    LinkPrettifier::new(&site)
  }

  fn prettify(html: &str) -> String {
    let (bytes, _) = prettifier().prettify_html(html).unwrap();
    String::from_utf8(bytes).unwrap()
  }

  #[test]
  fn computes_pretty_hrefs() {
    assert_eq!(prettify_href("index.html", "index.html").as_deref(), Some("/"));
    assert_eq!(prettify_href("about.html", "index.html").as_deref(), Some("about"));
    assert_eq!(
      prettify_href("/team/Contact.HTML", "index.html").as_deref(),
      Some("/team/Contact")
    );
    assert_eq!(prettify_href("/docs/index.html", "index.html").as_deref(), Some("/docs/index"));
    assert_eq!(prettify_href("style.css", "index.html"), None);
    assert_eq!(prettify_href("page.html#top", "index.html"), None);
  }

  #[test]
  fn rewrites_relative_and_same_site_links() {
    let output = prettify(
      r#"<a href="index.html">Home</a><a href="about.html">About</a><a href="https://www.example.dk/contact.html">Contact</a>"#,
    );
    assert!(output.contains(r#"<a href="/">Home</a>"#));
    assert!(output.contains(r#"<a href="about">About</a>"#));
    assert!(output.contains(r#"<a href="https://www.example.dk/contact">Contact</a>"#));
  }

  #[test]
  fn leaves_external_links_untouched() {
    let output = prettify(
      r#"<a href="http://other.example/x.html">x</a><a href="//cdn.example/y.html">y</a><a href="">z</a>"#,
    );
    assert!(output.contains(r#"href="http://other.example/x.html""#));
    assert!(output.contains(r#"href="//cdn.example/y.html""#));
    assert!(output.contains(r#"href="""#));
  }

  #[test]
  fn reports_number_of_changed_links() {
    let (_, changed) = prettifier()
      .prettify_html(r#"<a href="a.html"></a><a href="b"></a><a>none</a>"#)
      .unwrap();
    assert_eq!(changed, 1);
  }

  #[test]
  fn rewrite_is_idempotent_on_disk() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("index.html");
    fs::write(
      &file,
      "<!DOCTYPE html><html><head><title>Home</title></head><body><p>No links</p></body></html>",
    )
    .unwrap();

    let prettifier = prettifier();
    prettifier.rewrite(&file).unwrap();
    let once = fs::read(&file).unwrap();
    prettifier.rewrite(&file).unwrap();
    let twice = fs::read(&file).unwrap();

    assert_eq!(once, twice);
  }

  #[test]
  fn rewrite_reports_missing_file() {
    let dir = tempdir().unwrap();
    let err = prettifier().rewrite(&dir.path().join("missing.html")).unwrap_err();
    assert!(matches!(err, PrettifyError::Io { .. }));
  }

  #[test]
  fn rewrite_tree_visits_nested_html_files() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("about");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join("index.html"), r#"<a href="about/team.html">Team</a>"#).unwrap();
    fs::write(nested.join("team.html"), r#"<a href="index.html">Home</a>"#).unwrap();
    fs::write(nested.join("notes.txt"), r#"<a href="index.html">Home</a>"#).unwrap();

    let count = prettifier().rewrite_tree(dir.path()).unwrap();
    assert_eq!(count, 2);

    let root = fs::read_to_string(dir.path().join("index.html")).unwrap();
    let team = fs::read_to_string(nested.join("team.html")).unwrap();
    let notes = fs::read_to_string(nested.join("notes.txt")).unwrap();
    assert!(root.contains(r#"href="about/team""#));
    assert!(team.contains(r#"href="/""#));
    assert!(notes.contains(r#"href="index.html""#));
  }
}

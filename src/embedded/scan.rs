//! Locating initialisation attributes and the asset paths embedded in their text.

use std::collections::{BTreeSet, HashMap};
use std::io;

use kuchikiki::traits::*;
use kuchikiki::{ElementData, NodeDataRef, NodeRef};
use regex::{Captures, Regex};

/// Build the pattern matching site-absolute paths that end in the dynamic asset suffix.
///
/// Paths start with `/` and consist of ASCII word characters, hyphens, dots and slashes.
pub fn asset_path_pattern(suffix: &str) -> Regex {
  Regex::new(&format!(r"/[-A-Za-z0-9_/.]+\.{}", regex::escape(suffix)))
    .expect("invalid asset path regex")
}

/// Every distinct asset path in `text`, in order of first appearance.
pub fn find_asset_paths(pattern: &Regex, text: &str) -> Vec<String> {
  let mut seen = BTreeSet::new();
  pattern
    .find_iter(text)
    .map(|found| found.as_str())
    .filter(|path| seen.insert(*path))
    .map(str::to_string)
    .collect()
}

/// Replace each matched asset path in `text` by its resolved counterpart.
///
/// Matches without a replacement are left untouched.
pub fn substitute_asset_paths(
  pattern: &Regex,
  text: &str,
  replacements: &HashMap<&str, &str>,
) -> String {
  pattern
    .replace_all(text, |caps: &Captures| {
      let found = &caps[0];
      replacements.get(found).copied().unwrap_or(found).to_string()
    })
    .into_owned()
}

/// An initialisation attribute holding at least one asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeScan {
  /// Position among the document's elements carrying any candidate attribute.
  pub element_index: usize,
  /// Attribute the text was read from.
  pub attribute: String,
  /// Attribute text as parsed.
  pub text: String,
  /// Distinct asset paths found in the text.
  pub paths: Vec<String>,
}

/// New value for one attribute of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRewrite {
  /// Position among the document's elements carrying any candidate attribute.
  pub element_index: usize,
  /// Attribute to overwrite.
  pub attribute: String,
  /// Replacement text.
  pub value: String,
}

/// Parse `html` and report every initialisation attribute that references assets.
pub fn scan_document(html: &str, attributes: &[String], pattern: &Regex) -> Vec<AttributeScan> {
  let document = kuchikiki::parse_html().one(html);

  init_elements(&document, attributes)
    .enumerate()
    .filter_map(|(element_index, element)| {
      let (attribute, text) = read_init_attribute(&element, attributes)?;
      let paths = find_asset_paths(pattern, &text);
      (!paths.is_empty()).then_some(AttributeScan {
        element_index,
        attribute,
        text,
        paths,
      })
    })
    .collect()
}

/// Re-parse `html`, apply the rewrites and serialise the resulting tree.
pub fn apply_rewrites(
  html: &str,
  attributes: &[String],
  rewrites: &[AttributeRewrite],
) -> io::Result<Vec<u8>> {
  let document = kuchikiki::parse_html().one(html);
  let by_index: HashMap<usize, &AttributeRewrite> = rewrites
    .iter()
    .map(|rewrite| (rewrite.element_index, rewrite))
    .collect();

  for (index, element) in init_elements(&document, attributes).enumerate() {
    if let Some(rewrite) = by_index.get(&index) {
      element
        .attributes
        .borrow_mut()
        .insert(rewrite.attribute.as_str(), rewrite.value.clone());
    }
  }

  let mut bytes = Vec::new();
  document.serialize(&mut bytes)?;
  Ok(bytes)
}

/// Elements carrying any of the candidate attributes, in document order.
fn init_elements<'a>(
  document: &NodeRef,
  attributes: &'a [String],
) -> impl Iterator<Item = NodeDataRef<ElementData>> + 'a {
  document.descendants().elements().filter(move |element| {
    let attrs = element.attributes.borrow();
    attributes.iter().any(|name| attrs.contains(name.as_str()))
  })
}

/// Read the first candidate attribute with a non-empty value.
fn read_init_attribute(
  element: &NodeDataRef<ElementData>,
  attributes: &[String],
) -> Option<(String, String)> {
  let attrs = element.attributes.borrow();
  attributes.iter().find_map(|name| {
    attrs
      .get(name.as_str())
      .filter(|value| !value.is_empty())
      .map(|value| (name.clone(), value.to_string()))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn attributes() -> Vec<String> {
    vec!["data-ng-init".into(), "ng-init".into()]
  }

  #[test]
  fn finds_and_deduplicates_paths() {
    let pattern = asset_path_pattern("ashx");
    let text = "init({logo: '/media/logo.ashx', icon: '/media/icon.ashx', again: '/media/logo.ashx'})";
    assert_eq!(find_asset_paths(&pattern, text), vec![
      "/media/logo.ashx".to_string(),
      "/media/icon.ashx".to_string(),
    ]);
  }

  #[test]
  fn ignores_relative_and_other_suffixes() {
    let pattern = asset_path_pattern("ashx");
    assert!(find_asset_paths(&pattern, "a('media/logo.ashx'); b('/media/logo.png')").is_empty());
  }

  #[test]
  fn match_stops_at_first_suffix_boundary() {
    let pattern = asset_path_pattern("ashx");
    assert_eq!(find_asset_paths(&pattern, "'/gen.ashxyz'"), vec![
      "/gen.ashx".to_string()
    ]);
  }

  #[test]
  fn substitution_replaces_exact_matches_only() {
    let pattern = asset_path_pattern("ashx");
    let mut replacements = HashMap::new();
    replacements.insert("/a.ashx", "/a.png");
    let text = "['/a.ashx', '/b/a.ashx', '/a.ashx']";
    assert_eq!(
      substitute_asset_paths(&pattern, text, &replacements),
      "['/a.png', '/b/a.ashx', '/a.png']"
    );
  }

  #[test]
  fn prefers_namespaced_attribute() {
    let pattern = asset_path_pattern("ashx");
    let html = r#"<div data-ng-init="x='/one.ashx'" ng-init="y='/two.ashx'"></div>"#;
    let scans = scan_document(html, &attributes(), &pattern);
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].attribute, "data-ng-init");
    assert_eq!(scans[0].paths, vec!["/one.ashx".to_string()]);
  }

  #[test]
  fn falls_back_to_plain_attribute_and_any_element() {
    let pattern = asset_path_pattern("ashx");
    let html = r#"<section data-ng-init="" ng-init="y='/two.ashx'"></section><p ng-init="z=1"></p><span ng-init="w='/three.ashx'"></span>"#;
    let scans = scan_document(html, &attributes(), &pattern);
    assert_eq!(scans.len(), 2);
    assert_eq!(scans[0].attribute, "ng-init");
    assert_eq!(scans[0].element_index, 0);
    assert_eq!(scans[1].element_index, 2);
  }

  #[test]
  fn rewrites_are_applied_by_element_position() {
    let html = r#"<div ng-init="a='/one.ashx'"></div><div ng-init="b='/two.ashx'"></div>"#;
    let rewrites = vec![AttributeRewrite {
      element_index: 1,
      attribute: "ng-init".into(),
      value: "b='/two.png'".into(),
    }];
    let bytes = apply_rewrites(html, &attributes(), &rewrites).unwrap();
    let output = String::from_utf8(bytes).unwrap();
    assert!(output.contains("a='/one.ashx'"));
    assert!(output.contains("b='/two.png'"));
  }
}

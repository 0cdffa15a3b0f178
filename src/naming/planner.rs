use percent_encoding::percent_decode_str;
use tracing::{debug, warn};
use url::Url;

use super::extension::{split_extension, subtype_extension};
use super::fingerprint::fingerprint;
use crate::models::{PathPlan, ResourceDescriptor};
use crate::site::SiteContext;

/// Maps resource URLs to deterministic output-relative file paths.
#[derive(Debug, Clone)]
pub struct FilenameMapper {
    index_document: String,
    dotted_suffix: String,
}

impl FilenameMapper {
    /// Capture the naming conventions of the given site.
    pub fn new(site: &SiteContext) -> Self {
        Self {
            index_document: site.index_document.clone(),
            dotted_suffix: site.dotted_suffix(),
        }
    }

    /// Plan the output path of a discovered resource.
    pub fn plan(&self, resource: &ResourceDescriptor) -> PathPlan {
        self.plan_url(
            &resource.source_url,
            resource.is_html_hint,
            resource.response_mime_type.as_deref(),
        )
    }

    /// Plan the output path for a URL, an HTML hint and an optional response MIME type.
    pub fn plan_url(&self, url: &Url, is_html: bool, mime_type: Option<&str>) -> PathPlan {
        let decoded = percent_decode_str(url.path()).decode_utf8_lossy();
        let mut path = self.relative_path(&decoded);

        let fingerprint = fingerprint(url);
        if !fingerprint.is_empty() {
            path = splice_fingerprint(&path, &fingerprint);
        }

        let is_dynamic = path.ends_with(&self.dotted_suffix);

        if is_html && !is_dynamic && !has_html_extension(&path) {
            path.push_str(".html");
        }

        if is_dynamic {
            path = self.resolve_dynamic_suffix(url, path, mime_type);
        }

        debug!("{url} --> {path}");
        PathPlan {
            output_relative_path: path,
        }
    }

    /// Turn a decoded URL path into a relative path without traversal segments.
    fn relative_path(&self, decoded: &str) -> String {
        let segments: Vec<&str> = decoded
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .collect();

        if segments.is_empty() {
            return self.index_document.clone();
        }

        let joined = segments.join("/");
        if decoded.ends_with('/') {
            format!("{joined}/{}", self.index_document)
        } else {
            joined
        }
    }

    fn resolve_dynamic_suffix(&self, url: &Url, path: String, mime_type: Option<&str>) -> String {
        let Some(extension) = mime_type.and_then(subtype_extension) else {
            warn!("{url}: no response MIME type to resolve {}", self.dotted_suffix);
            return path;
        };

        let stem = path.strip_suffix(&self.dotted_suffix).unwrap_or(&path);
        format!("{stem}.{extension}")
    }
}

fn has_html_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm")
}

/// Insert `_<fingerprint>` between the file stem and its extension.
fn splice_fingerprint(path: &str, fingerprint: &str) -> String {
    let (dir, file_name) = match path.rfind('/') {
        Some(index) => path.split_at(index + 1),
        None => ("", path),
    };
    let (stem, extension) = split_extension(file_name);
    format!("{dir}{stem}_{fingerprint}{extension}")
}

//! Deterministic output naming for mirrored resources.
//!
//! The planner turns a resource URL and its response metadata into a relative path under
//! the output root. Query and fragment text is folded into a short fingerprint so that
//! variants of the same path never collide, and server-generated assets receive an
//! extension that matches their declared content type.

mod extension;
mod fingerprint;
mod planner;

pub use extension::{extension_for_mime, mime_essence, split_extension, subtype_extension};
pub use fingerprint::{FINGERPRINT_WIDTH, fingerprint, fingerprint_str};
pub use planner::FilenameMapper;

//! Path segmenter.
//!
//! A path directive is a `/`-separated list of XML element names. Every segment
//! must be non-empty and consist only of word characters and `:`
//! (`[\w:]+`, ASCII word characters). Leading or trailing separators and
//! whitespace anywhere in a segment are rejected.
//!
//! ```
//! use xmlbind_core::path::segment;
//!
//! let path = segment("foo/bar").unwrap();
//! assert_eq!(path.segments(), &["foo".to_string(), "bar".to_string()]);
//!
//! assert!(segment("/foo").is_err());
//! assert!(segment("foo/").is_err());
//! assert!(segment("foo/ bar").is_err());
//! assert!(segment("").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PathError;

const SEPARATOR: char = '/';

/// A validated sequence of XML element names.
///
/// [`segment`] never produces an empty path; [`XmlPath::root`] is the empty
/// path addressing the class's own element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XmlPath {
    segments: Vec<String>,
}

impl XmlPath {
    /// The empty path (the bound class's own element).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from already-validated segments.
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// The path's segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return a new path with `name` appended.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Check whether `prefix` is a (non-strict) prefix of this path.
    pub fn starts_with(&self, prefix: &XmlPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Check whether this path extends `prefix` by at least one segment.
    pub fn is_strict_extension_of(&self, prefix: &XmlPath) -> bool {
        self.len() > prefix.len() && self.starts_with(prefix)
    }
}

impl fmt::Display for XmlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "{SEPARATOR}")
        } else {
            write!(f, "{}", self.segments.join("/"))
        }
    }
}

/// Parse a path directive into validated segments.
pub fn segment(path: &str) -> Result<XmlPath, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if path.starts_with(SEPARATOR) {
        return Err(PathError::LeadingSeparator(path.to_string()));
    }
    if path.ends_with(SEPARATOR) {
        return Err(PathError::TrailingSeparator(path.to_string()));
    }

    let mut segments = Vec::new();
    for (index, piece) in path.split(SEPARATOR).enumerate() {
        if piece.is_empty() {
            return Err(PathError::EmptySegment {
                path: path.to_string(),
                index,
            });
        }
        validate_name(piece)?;
        segments.push(piece.to_string());
    }

    Ok(XmlPath { segments })
}

/// Validate a single XML name against the segment rule.
///
/// Attribute, element and matcher names go through the same check as path
/// segments.
pub fn validate_name(name: &str) -> Result<(), PathError> {
    if name.is_empty() {
        return Err(PathError::Empty);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(PathError::Whitespace(name.to_string()));
    }
    if let Some(ch) = name.chars().find(|c| !is_name_char(*c)) {
        return Err(PathError::InvalidCharacter {
            segment: name.to_string(),
            ch,
        });
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':'
}

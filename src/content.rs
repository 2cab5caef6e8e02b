//! Content loading with optional front matter.
//!
//! Markdown sources may open with a metadata block delimited by `---`
//! lines:
//!
//! ```text
//! ---
//! title: About
//! author: jo
//! ---
//!
//! # About this site
//! ...
//! ```
//!
//! [`Content::load`] splits that block from the body. Metadata is a flat
//! set of trimmed `key: value` pairs; there is no nesting and no type
//! coercion. A document without a well-formed block (missing opening or
//! closing delimiter, or a line with no colon) is treated as having no
//! metadata at all — the whole input becomes the body. Authoring mistakes
//! in front matter should degrade to visible text, not abort a build.

use std::collections::BTreeMap;
use std::fmt;

const DELIMITER: &str = "---";

/// A parsed source document: front-matter metadata plus the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub metadata: BTreeMap<String, String>,
    pub body: String,
}

impl Content {
    /// Split optional front matter from a raw document.
    pub fn load(raw: &str) -> Content {
        match split_front_matter(raw) {
            Some((metadata, body)) => Content {
                metadata,
                body: body.to_string(),
            },
            None => Content {
                metadata: BTreeMap::new(),
                body: raw.to_string(),
            },
        }
    }
}

impl fmt::Display for Content {
    /// Render the metadata map, `{key: value, ...}` in key order. Used by
    /// the build output when reporting conversions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.metadata.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Returns `(metadata, body)` when the document opens with a well-formed
/// delimited block, `None` otherwise.
fn split_front_matter(raw: &str) -> Option<(BTreeMap<String, String>, &str)> {
    let rest = raw.strip_prefix(DELIMITER)?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    let mut metadata = BTreeMap::new();
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed == DELIMITER {
            let body = &rest[offset + line.len()..];
            return Some((metadata, body.trim_start_matches(['\n', '\r'])));
        }
        let (key, value) = trimmed.split_once(':')?;
        if key.trim().is_empty() {
            return None;
        }
        metadata.insert(key.trim().to_string(), value.trim().to_string());
        offset += line.len();
    }
    // Never saw the closing delimiter
    None
}

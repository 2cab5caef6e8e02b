//! Template manifest model and loading.
//!
//! A manifest is a JSON document describing one website template and the
//! pages composed from it:
//!
//! ```json
//! {
//!   "template": "agency",
//!   "type": "website",
//!   "pages": [
//!     {
//!       "name": "home",
//!       "framework": "bootstrap",
//!       "css_file": "styles.css",
//!       "sections": [
//!         { "nav": { "file_name": "topnav" } },
//!         { "div": [ { "type": "body", "file_name": "hero" } ] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `template` names both the output subdirectory and the namespace used to
//! look up fragments and assets on disk. `type` selects the handling mode;
//! only `"website"` does anything, every other value makes the whole
//! manifest a no-op. Per page, `framework` gates composition the same way
//! (only `"bootstrap"` is implemented).
//!
//! The manifest is loaded once per build and read-only thereafter. Section
//! and div entries are kept in document order; composition concatenates
//! them verbatim, so order here is order in the output page.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed manifest {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid template name {0:?}: must be non-empty and free of path separators")]
    InvalidTemplate(String),
}

/// Manifest `type` value that enables website composition.
pub const WEBSITE_TYPE: &str = "website";

/// Page `framework` value that enables page composition.
pub const BOOTSTRAP_FRAMEWORK: &str = "bootstrap";

/// Root manifest object.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Output subdirectory name and fragment/asset lookup namespace.
    pub template: String,
    /// Handling mode. Anything other than [`WEBSITE_TYPE`] is a no-op.
    #[serde(rename = "type")]
    pub kind: String,
    /// Pages in composition order.
    pub pages: Vec<Page>,
}

/// One page entry. Becomes `<name>.html` under the template's output
/// directory when composed.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub name: String,
    /// Page style family. Anything other than [`BOOTSTRAP_FRAMEWORK`] is
    /// skipped silently.
    pub framework: String,
    /// Stylesheet filename within the template's head CSS pool.
    #[serde(default)]
    pub css_file: Option<String>,
    /// Script filename within the template's head JS pool.
    #[serde(default)]
    pub js_file: Option<String>,
    /// Ordered body sections. A page with no sections produces no output.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One body section: an optional navigation fragment followed by any
/// number of div fragments, emitted in this order.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub nav: Option<NavRef>,
    #[serde(default)]
    pub div: Vec<DivRef>,
}

/// Reference to a navigation/header fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct NavRef {
    pub file_name: String,
}

/// Reference to a content fragment. `kind` is kept as the raw manifest
/// string: recognized values (`header`, `body`, `footer`) map to fragment
/// roles, anything else is ignored without error at composition time.
#[derive(Debug, Clone, Deserialize)]
pub struct DivRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub file_name: String,
}

impl Manifest {
    /// Whether this manifest is in the one handled mode.
    pub fn is_website(&self) -> bool {
        self.kind == WEBSITE_TYPE
    }
}

impl Page {
    pub fn is_bootstrap(&self) -> bool {
        self.framework == BOOTSTRAP_FRAMEWORK
    }
}

/// Load and decode a manifest file.
///
/// Fails with [`ManifestError::Malformed`] when the JSON is unparsable or
/// any required field is missing, and with
/// [`ManifestError::InvalidTemplate`] when the template name cannot be
/// used as a directory name. Optional page fields (`css_file`, `js_file`,
/// `sections`) simply default to empty.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let raw = fs::read_to_string(path)?;
    let manifest: Manifest =
        serde_json::from_str(&raw).map_err(|source| ManifestError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    validate_template_name(&manifest.template)?;
    Ok(manifest)
}

/// The template name becomes a path component in both fragment lookups and
/// the output layout, so it must not escape its directory.
fn validate_template_name(name: &str) -> Result<(), ManifestError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ManifestError::InvalidTemplate(name.to_string()));
    }
    Ok(())
}

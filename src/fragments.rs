//! Fragment resolution and loading.
//!
//! Fragments are pre-authored HTML snippets referenced by name from a
//! manifest section. They are opaque to the composer: loaded as raw bytes
//! and appended to the output page verbatim, with no interpolation and no
//! structure of their own.
//!
//! ## On-Disk Convention
//!
//! Each fragment role has a fixed directory under the template's section
//! tree:
//!
//! ```text
//! web/bootstrap/main/<template>/sections/
//! ├── headers/        # navigation fragments (NavRef)
//! ├── columns/        # header and body div fragments
//! └── footer/         # footer div fragments
//! ```
//!
//! The manifest refers to fragments by bare name; the resolver appends the
//! `.html` extension.
//!
//! A missing fragment is a template-authoring defect and aborts the whole
//! build rather than skipping the page — a silent skip would ship a
//! structurally broken page.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("Fragment not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a fragment slots into a composed page. The role picks the
/// directory it is resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentRole {
    Nav,
    Header,
    Body,
    Footer,
}

impl FragmentRole {
    /// Map a manifest div `type` string to a role. Unrecognized values
    /// yield `None`; callers skip those refs without error.
    pub fn from_div_kind(kind: &str) -> Option<Self> {
        match kind {
            "header" => Some(Self::Header),
            "body" => Some(Self::Body),
            "footer" => Some(Self::Footer),
            _ => None,
        }
    }

    /// Subdirectory under `sections/` this role is stored in.
    fn section_dir(self) -> &'static str {
        match self {
            Self::Nav => "headers",
            // header and body fragments share the columns pool
            Self::Header | Self::Body => "columns",
            Self::Footer => "footer",
        }
    }
}

/// Compute the on-disk path for a fragment. Pure path arithmetic — the
/// file may or may not exist.
pub fn resolve(web_root: &Path, template: &str, role: FragmentRole, file_name: &str) -> PathBuf {
    web_root
        .join("bootstrap")
        .join("main")
        .join(template)
        .join("sections")
        .join(role.section_dir())
        .join(format!("{file_name}.html"))
}

/// Read a resolved fragment's bytes.
///
/// Fails with [`FragmentError::NotFound`] when the path does not exist;
/// this is build-fatal at the call site, never a per-page skip.
pub fn load(path: &Path) -> Result<Vec<u8>, FragmentError> {
    if !path.is_file() {
        return Err(FragmentError::NotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

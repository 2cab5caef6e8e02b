//! Output staging: per-template directory skeleton and asset copies.
//!
//! Every composed template gets the same output layout:
//!
//! ```text
//! dist/<template>/
//! ├── <page>.html            # written by the composer
//! ├── css/                   # staged stylesheets (and scripts, see below)
//! ├── js/
//! └── assets/
//!     └── img/
//! ```
//!
//! Staging is idempotent: directories are created with `create_dir_all`
//! and asset copies overwrite, so pages sharing a template can stage in
//! any order and a re-run converges on the same tree.
//!
//! ## The JS Destination Quirk
//!
//! Referenced JS assets are copied into the **css** output folder, not
//! `js/`, and the composer never emits a `<script>` tag for them. Both
//! behaviors are long-standing quirks of the template format that existing
//! template trees rely on; they are kept as-is and documented here rather
//! than fixed. The empty `js/` directory is still created so the layout
//! stays uniform.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Asset pools under the template's head directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    Js,
}

impl AssetKind {
    /// Source pool subdirectory under `<web-root>/bootstrap/head/<template>/`.
    fn pool_dir(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
        }
    }
}

/// Resolved output directories for one template, created by
/// [`stage_template_dirs`] and reused by the composer.
#[derive(Debug, Clone)]
pub struct StagedDirs {
    /// `<dest>/<template>/` — composed pages land here.
    pub root: PathBuf,
    pub css: PathBuf,
    pub js: PathBuf,
    pub img: PathBuf,
}

/// Create the output directory skeleton for a template.
///
/// Safe to call once per page; already-present directories are not an
/// error.
pub fn stage_template_dirs(dest: &Path, template: &str) -> std::io::Result<StagedDirs> {
    let root = dest.join(template);
    let css = root.join("css");
    let js = root.join("js");
    let img = root.join("assets").join("img");

    fs::create_dir_all(&css)?;
    fs::create_dir_all(&js)?;
    fs::create_dir_all(&img)?;

    Ok(StagedDirs { root, css, js, img })
}

/// Copy one referenced asset from the template's head pool into the staged
/// output.
///
/// Source convention: `<web-root>/bootstrap/head/<template>/<kind>/<file>`.
/// Both kinds land in the staged css directory (see module docs for the JS
/// quirk). Fails with [`AssetError::NotFound`] when the source file is
/// missing.
pub fn copy_asset(
    web_root: &Path,
    template: &str,
    kind: AssetKind,
    file_name: &str,
    staged: &StagedDirs,
) -> Result<(), AssetError> {
    let src = web_root
        .join("bootstrap")
        .join("head")
        .join(template)
        .join(kind.pool_dir())
        .join(file_name);

    if !src.is_file() {
        return Err(AssetError::NotFound(src));
    }

    fs::copy(&src, staged.css.join(file_name))?;
    Ok(())
}

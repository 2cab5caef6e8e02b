//! Shared test utilities for the sitewright test suite.
//!
//! Builds template-tree fixtures inside temp directories so tests never
//! depend on checked-in fixture files. The layout mirrors the conventions
//! documented in [`crate::fragments`] and [`crate::assets`]:
//!
//! ```text
//! <tmp>/web/bootstrap/main/<template>/<page>.html            gate files
//! <tmp>/web/bootstrap/main/<template>/sections/<role>/*.html fragments
//! <tmp>/web/bootstrap/head/<template>/{css,js}/*             asset pools
//! <tmp>/dist/                                                output root
//! ```

use crate::compose;
use crate::fragments::{self, FragmentRole};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Conventional `(web_root, dest)` pair inside a temp directory. Neither
/// directory is created — production code is responsible for staging.
pub fn site_roots(tmp: &TempDir) -> (PathBuf, PathBuf) {
    (tmp.path().join("web"), tmp.path().join("dist"))
}

/// Create an (empty) gate file enabling composition of `page`.
pub fn write_gate_file(web_root: &Path, template: &str, page: &str) {
    let path = compose::gate_path(web_root, template, page);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

/// Write a fragment into the role's section directory.
pub fn write_fragment(web_root: &Path, template: &str, role: FragmentRole, name: &str, html: &str) {
    let path = fragments::resolve(web_root, template, role, name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, html).unwrap();
}

/// Write a file into the template's head asset pool (`pool` is `"css"` or
/// `"js"`).
pub fn write_head_asset(web_root: &Path, template: &str, pool: &str, name: &str, content: &str) {
    let dir = web_root
        .join("bootstrap")
        .join("head")
        .join(template)
        .join(pool);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

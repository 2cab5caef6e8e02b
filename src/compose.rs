//! Manifest-driven page composition.
//!
//! The composer turns one template manifest into finished HTML pages:
//! for each page entry it emits a fixed head preamble, stages and links
//! the page's stylesheet, then concatenates the referenced fragments in
//! manifest order and writes the result as a single file under
//! `<dest>/<template>/`.
//!
//! ## Skip Policy
//!
//! Three conditions make a page a silent no-op, in this order:
//!
//! 1. `framework` is not `"bootstrap"`.
//! 2. The page's gate file `<web-root>/bootstrap/main/<template>/<name>.html`
//!    does not exist. Only its existence matters — the file is never read.
//! 3. The page has no `sections`.
//!
//! Skips produce no output file and no diagnostic. `--strict` upgrades the
//! first two to errors for template authors who want them caught; empty
//! `sections` stays a skip even then, since a sectionless page is a valid
//! authoring state rather than a defect.
//!
//! A manifest whose `type` is not `"website"` is a whole-manifest no-op.
//!
//! ## Failure Semantics
//!
//! Missing fragments and missing assets abort the whole build. The page
//! document is accumulated in memory and written exactly once at the end,
//! so an aborted page leaves no partial file behind; pages composed before
//! the failing one remain on disk.
//!
//! ## Output Shape
//!
//! The composed document deliberately ends after the last fragment: no
//! closing `</body></html>` is appended, and a staged JS asset is copied
//! but never linked with a `<script>` tag. Both match the format the
//! existing template trees were authored against; see the notes in
//! DESIGN.md before changing either.

use crate::assets::{self, AssetError, AssetKind, StagedDirs};
use crate::fragments::{self, FragmentError, FragmentRole};
use crate::manifest::{self, Manifest, ManifestError, Page};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Fragment(#[from] FragmentError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Page {page:?} declares unsupported framework {framework:?}")]
    UnknownFramework { page: String, framework: String },
    #[error("Page {page:?} has no gate file at {path}")]
    MissingGateFile { page: String, path: PathBuf },
}

/// Composition switches. `Default` gives the permissive behavior described
/// in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeOptions {
    /// Turn framework-mismatch and missing-gate-file skips into errors.
    pub strict: bool,
}

/// What happened to one page entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page written to `output`.
    Composed { output: PathBuf },
    /// `framework` was not `"bootstrap"`.
    SkippedFramework,
    /// The gate file was absent.
    SkippedMissingGate,
    /// The page had no sections.
    SkippedNoSections,
}

#[derive(Debug, Clone)]
pub struct PageResult {
    pub name: String,
    pub outcome: PageOutcome,
}

/// Result of composing one manifest. Skipped pages are recorded here for
/// callers that want them (tests, future tooling) but are never printed.
#[derive(Debug, Clone)]
pub struct ComposeReport {
    pub template: String,
    /// False when the manifest `type` made the whole run a no-op.
    pub website: bool,
    pub pages: Vec<PageResult>,
}

impl ComposeReport {
    /// Pages actually written, in manifest order.
    pub fn composed(&self) -> impl Iterator<Item = &PageResult> {
        self.pages
            .iter()
            .filter(|p| matches!(p.outcome, PageOutcome::Composed { .. }))
    }
}

/// Fixed document head emitted before any per-page content. The trailing
/// marker comment sits directly above the page's stylesheet link.
pub const HEAD_PREAMBLE: &str = "\
<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"utf-8\" />
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1, shrink-to-fit=no\" />
    <!-- Font Awesome icons (free version) -->
    <link rel=\"stylesheet\" href=\"https://use.fontawesome.com/releases/v5.15.4/css/all.css\" crossorigin=\"anonymous\" />
    <!-- Core theme CSS (includes Bootstrap) -->
";

const BODY_OPEN: &str = "</head>\n<body id=\"page-top\">\n";

/// Load a manifest file and compose every page it declares.
///
/// This is the standalone entry point: it only needs the manifest path,
/// the template tree root, and the destination root.
pub fn compose_manifest(
    manifest_path: &Path,
    web_root: &Path,
    dest: &Path,
    options: ComposeOptions,
) -> Result<ComposeReport, ComposeError> {
    let manifest = manifest::load_manifest(manifest_path)?;
    compose(&manifest, web_root, dest, options)
}

/// Compose every page of an already-loaded manifest, strictly in manifest
/// order. Stops at the first fatal error; earlier pages stay on disk.
pub fn compose(
    manifest: &Manifest,
    web_root: &Path,
    dest: &Path,
    options: ComposeOptions,
) -> Result<ComposeReport, ComposeError> {
    let mut report = ComposeReport {
        template: manifest.template.clone(),
        website: manifest.is_website(),
        pages: Vec::new(),
    };

    if !report.website {
        return Ok(report);
    }

    for page in &manifest.pages {
        let outcome = compose_page(&manifest.template, page, web_root, dest, options)?;
        report.pages.push(PageResult {
            name: page.name.clone(),
            outcome,
        });
    }

    Ok(report)
}

/// Existence of this file is what enables composition of a page; its
/// content is never read.
pub fn gate_path(web_root: &Path, template: &str, page_name: &str) -> PathBuf {
    web_root
        .join("bootstrap")
        .join("main")
        .join(template)
        .join(format!("{page_name}.html"))
}

fn compose_page(
    template: &str,
    page: &Page,
    web_root: &Path,
    dest: &Path,
    options: ComposeOptions,
) -> Result<PageOutcome, ComposeError> {
    if !page.is_bootstrap() {
        if options.strict {
            return Err(ComposeError::UnknownFramework {
                page: page.name.clone(),
                framework: page.framework.clone(),
            });
        }
        return Ok(PageOutcome::SkippedFramework);
    }

    let gate = gate_path(web_root, template, &page.name);
    if !gate.is_file() {
        if options.strict {
            return Err(ComposeError::MissingGateFile {
                page: page.name.clone(),
                path: gate,
            });
        }
        return Ok(PageOutcome::SkippedMissingGate);
    }

    if page.sections.is_empty() {
        return Ok(PageOutcome::SkippedNoSections);
    }

    let staged = assets::stage_template_dirs(dest, template)?;

    let mut doc: Vec<u8> = Vec::new();
    doc.extend_from_slice(HEAD_PREAMBLE.as_bytes());
    emit_head_assets(template, page, web_root, &staged, &mut doc)?;
    doc.extend_from_slice(BODY_OPEN.as_bytes());

    for section in &page.sections {
        if let Some(nav) = &section.nav {
            let path = fragments::resolve(web_root, template, FragmentRole::Nav, &nav.file_name);
            doc.extend_from_slice(&fragments::load(&path)?);
        }
        for div in &section.div {
            // Unrecognized div types emit nothing
            let Some(role) = FragmentRole::from_div_kind(&div.kind) else {
                continue;
            };
            let path = fragments::resolve(web_root, template, role, &div.file_name);
            doc.extend_from_slice(&fragments::load(&path)?);
        }
    }

    let output = staged.root.join(format!("{}.html", page.name));
    fs::write(&output, &doc)?;

    Ok(PageOutcome::Composed { output })
}

/// Stage the page's head assets and emit the stylesheet link.
///
/// The link references the original filename under `css/`; the JS asset is
/// staged but intentionally not linked (module docs).
fn emit_head_assets(
    template: &str,
    page: &Page,
    web_root: &Path,
    staged: &StagedDirs,
    doc: &mut Vec<u8>,
) -> Result<(), ComposeError> {
    if let Some(css_file) = &page.css_file {
        assets::copy_asset(web_root, template, AssetKind::Css, css_file, staged)?;
        doc.extend_from_slice(
            format!("    <link rel=\"stylesheet\" href=\"css/{css_file}\" />\n").as_bytes(),
        );
    }

    if let Some(js_file) = &page.js_file {
        assets::copy_asset(web_root, template, AssetKind::Js, js_file, staged)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    /// One-page manifest against the standard fixture template.
    fn demo_manifest(kind: &str, framework: &str, sections_json: &str) -> Manifest {
        let json = format!(
            r#"{{
                "template": "demo",
                "type": "{kind}",
                "pages": [
                    {{
                        "name": "home",
                        "framework": "{framework}",
                        "sections": {sections_json}
                    }}
                ]
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn standard_sections() -> &'static str {
        r#"[
            { "nav": { "file_name": "topnav" } },
            { "div": [ { "type": "body", "file_name": "hero" } ] }
        ]"#
    }

    /// Fixture: gate file for `home`, a nav and a body fragment.
    fn standard_fixture(web_root: &std::path::Path) {
        write_gate_file(web_root, "demo", "home");
        write_fragment(web_root, "demo", FragmentRole::Nav, "topnav", "<nav>X</nav>");
        write_fragment(web_root, "demo", FragmentRole::Body, "hero", "<section>Y</section>");
    }

    #[test]
    fn non_website_manifest_is_noop() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        let manifest = demo_manifest("blog", "bootstrap", standard_sections());

        let report = compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        assert!(!report.website);
        assert!(report.pages.is_empty());
        assert!(!dest.exists());
    }

    #[test]
    fn foreign_framework_page_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        // No fixture at all: a skipped page must not touch the filesystem
        let manifest = demo_manifest("website", "vue", standard_sections());

        let report = compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        assert_eq!(report.pages[0].outcome, PageOutcome::SkippedFramework);
        assert!(!dest.exists());
    }

    #[test]
    fn missing_gate_file_skips_page() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        write_fragment(&web_root, "demo", FragmentRole::Nav, "topnav", "<nav>X</nav>");
        write_fragment(&web_root, "demo", FragmentRole::Body, "hero", "<section>Y</section>");
        let manifest = demo_manifest("website", "bootstrap", standard_sections());

        let report = compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        assert_eq!(report.pages[0].outcome, PageOutcome::SkippedMissingGate);
        assert!(!dest.join("demo/home.html").exists());
    }

    #[test]
    fn empty_sections_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        let manifest = demo_manifest("website", "bootstrap", "[]");

        let report = compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        assert_eq!(report.pages[0].outcome, PageOutcome::SkippedNoSections);
        // Skip happens before staging, so not even the skeleton appears
        assert!(!dest.join("demo").exists());
    }

    #[test]
    fn fragments_concatenate_in_manifest_order() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        write_fragment(&web_root, "demo", FragmentRole::Footer, "contact", "<footer>Z</footer>");
        let manifest = demo_manifest(
            "website",
            "bootstrap",
            r#"[
                { "nav": { "file_name": "topnav" } },
                { "div": [
                    { "type": "body", "file_name": "hero" },
                    { "type": "footer", "file_name": "contact" }
                ] }
            ]"#,
        );

        compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        let html = fs::read_to_string(dest.join("demo/home.html")).unwrap();
        let expected = format!(
            "{HEAD_PREAMBLE}</head>\n<body id=\"page-top\">\n<nav>X</nav><section>Y</section><footer>Z</footer>"
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn unknown_div_type_emits_nothing() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        // No fragment exists for the sidebar ref; an unknown type must not
        // even attempt resolution
        let manifest = demo_manifest(
            "website",
            "bootstrap",
            r#"[
                { "div": [
                    { "type": "sidebar", "file_name": "widgets" },
                    { "type": "body", "file_name": "hero" }
                ] }
            ]"#,
        );

        let report = compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        assert!(matches!(report.pages[0].outcome, PageOutcome::Composed { .. }));
        let html = fs::read_to_string(dest.join("demo/home.html")).unwrap();
        assert!(html.contains("<section>Y</section>"));
        assert!(!html.contains("widgets"));
    }

    #[test]
    fn missing_fragment_aborts_before_later_pages() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        write_gate_file(&web_root, "demo", "first");
        write_gate_file(&web_root, "demo", "second");
        write_gate_file(&web_root, "demo", "third");
        write_fragment(&web_root, "demo", FragmentRole::Body, "hero", "<section>Y</section>");

        let json = r#"{
            "template": "demo",
            "type": "website",
            "pages": [
                { "name": "first", "framework": "bootstrap",
                  "sections": [ { "div": [ { "type": "body", "file_name": "hero" } ] } ] },
                { "name": "second", "framework": "bootstrap",
                  "sections": [ { "div": [ { "type": "body", "file_name": "ghost" } ] } ] },
                { "name": "third", "framework": "bootstrap",
                  "sections": [ { "div": [ { "type": "body", "file_name": "hero" } ] } ] }
            ]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();

        let err = compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap_err();

        assert!(matches!(
            err,
            ComposeError::Fragment(FragmentError::NotFound(_))
        ));
        // First page completed before the failure; the failing page leaves
        // no partial file and later pages are never reached
        assert!(dest.join("demo/first.html").is_file());
        assert!(!dest.join("demo/second.html").exists());
        assert!(!dest.join("demo/third.html").exists());
    }

    #[test]
    fn recomposition_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        let manifest = demo_manifest("website", "bootstrap", standard_sections());

        compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();
        let first = fs::read(dest.join("demo/home.html")).unwrap();

        compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();
        let second = fs::read(dest.join("demo/home.html")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn css_asset_is_staged_and_linked_by_original_name() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        write_head_asset(&web_root, "demo", "css", "main.css", "body{}");

        let json = r#"{
            "template": "demo",
            "type": "website",
            "pages": [
                { "name": "home", "framework": "bootstrap", "css_file": "main.css",
                  "sections": [
                      { "nav": { "file_name": "topnav" } },
                      { "div": [ { "type": "body", "file_name": "hero" } ] }
                  ] }
            ]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();

        compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        let html = fs::read_to_string(dest.join("demo/home.html")).unwrap();
        let link_pos = html
            .find("<link rel=\"stylesheet\" href=\"css/main.css\" />")
            .expect("stylesheet link missing");
        let body_pos = html.find("<body id=\"page-top\">").unwrap();
        let nav_pos = html.find("<nav>X</nav>").unwrap();
        let hero_pos = html.find("<section>Y</section>").unwrap();
        assert!(html.starts_with(HEAD_PREAMBLE));
        assert!(link_pos < body_pos && body_pos < nav_pos && nav_pos < hero_pos);
        assert!(dest.join("demo/css/main.css").is_file());
    }

    #[test]
    fn js_asset_is_staged_but_never_linked() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        write_head_asset(&web_root, "demo", "js", "app.js", "console.log(1)");

        let json = r#"{
            "template": "demo",
            "type": "website",
            "pages": [
                { "name": "home", "framework": "bootstrap", "js_file": "app.js",
                  "sections": [ { "nav": { "file_name": "topnav" } } ] }
            ]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();

        compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        // Copied into the css folder, and absent from the document
        assert!(dest.join("demo/css/app.js").is_file());
        let html = fs::read_to_string(dest.join("demo/home.html")).unwrap();
        assert!(!html.contains("<script"));
        assert!(!html.contains("app.js"));
    }

    #[test]
    fn missing_css_asset_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);

        let json = r#"{
            "template": "demo",
            "type": "website",
            "pages": [
                { "name": "home", "framework": "bootstrap", "css_file": "ghost.css",
                  "sections": [ { "nav": { "file_name": "topnav" } } ] }
            ]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();

        let err = compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap_err();

        assert!(matches!(err, ComposeError::Asset(AssetError::NotFound(_))));
        assert!(!dest.join("demo/home.html").exists());
    }

    #[test]
    fn document_is_left_unclosed() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        let manifest = demo_manifest("website", "bootstrap", standard_sections());

        compose(&manifest, &web_root, &dest, ComposeOptions::default()).unwrap();

        let html = fs::read_to_string(dest.join("demo/home.html")).unwrap();
        assert!(!html.contains("</body>"));
        assert!(!html.contains("</html>"));
    }

    // =========================================================================
    // Strict mode
    // =========================================================================

    const STRICT: ComposeOptions = ComposeOptions { strict: true };

    #[test]
    fn strict_rejects_foreign_framework() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        let manifest = demo_manifest("website", "vue", standard_sections());

        let err = compose(&manifest, &web_root, &dest, STRICT).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::UnknownFramework { ref framework, .. } if framework == "vue"
        ));
    }

    #[test]
    fn strict_rejects_missing_gate_file() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        write_fragment(&web_root, "demo", FragmentRole::Nav, "topnav", "<nav>X</nav>");
        let manifest = demo_manifest(
            "website",
            "bootstrap",
            r#"[ { "nav": { "file_name": "topnav" } } ]"#,
        );

        let err = compose(&manifest, &web_root, &dest, STRICT).unwrap_err();
        assert!(matches!(err, ComposeError::MissingGateFile { .. }));
    }

    #[test]
    fn strict_still_skips_empty_sections() {
        let tmp = TempDir::new().unwrap();
        let (web_root, dest) = site_roots(&tmp);
        standard_fixture(&web_root);
        let manifest = demo_manifest("website", "bootstrap", "[]");

        let report = compose(&manifest, &web_root, &dest, STRICT).unwrap();
        assert_eq!(report.pages[0].outcome, PageOutcome::SkippedNoSections);
    }
}

//! # Sitewright
//!
//! A minimal static site generator with manifest-driven page composition.
//! A content tree of Markdown files, raw resources, and JSON template
//! manifests becomes a static website directory: every file is dispatched
//! by extension to the parser that knows how to handle it.
//!
//! # Architecture: Walk and Dispatch
//!
//! ```text
//! content/                    dist/
//! ├── template.json     →     ├── <template>/<page>.html   (composed)
//! ├── about.md          →     ├── about.html               (converted)
//! └── img/logo.png      →     └── img/logo.png             (copied)
//! ```
//!
//! The walker ([`site`]) owns discovery and routing only; each parser
//! ([`parsers`]) owns the complete handling of one file. The interesting
//! parser is the template composer ([`compose`]): it reads a JSON manifest
//! describing a website template, resolves reusable HTML fragments per
//! page ([`fragments`]), stages the template's output directories and
//! assets ([`assets`]), and writes each assembled page as a single file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Walks the content tree and dispatches files by extension |
//! | [`parsers`] | Resource copier, Markdown converter, template-manifest handler |
//! | [`manifest`] | Typed model of the JSON template manifest |
//! | [`compose`] | Per-page composition: preamble, assets, ordered fragment concatenation |
//! | [`fragments`] | Role-keyed fragment path convention and loading |
//! | [`assets`] | Output directory skeleton and CSS/JS staging |
//! | [`content`] | Front-matter splitting for Markdown sources |
//! | [`config`] | `config.toml` loading and the stock config |
//! | [`output`] | CLI display formatting — pure `format_*`, thin `print_*` |
//!
//! # Design Decisions
//!
//! ## Fragments Are Opaque
//!
//! There is no templating language. Fragments are pre-authored HTML blobs
//! concatenated byte-for-byte in manifest order; loops, conditionals, and
//! interpolation live in whatever authored the fragments, not here. This
//! keeps composition a pure ordering concern and makes output trivially
//! predictable: the page is exactly the preamble plus its fragments.
//!
//! ## Skip Silently, Fail Loudly
//!
//! A page whose `framework` is unrecognized, whose gate file is absent, or
//! whose `sections` are empty is skipped with no output and no diagnostic
//! — manifests routinely carry entries for templates that are not staged
//! on this machine. A *referenced-but-missing* fragment or asset is the
//! opposite case: the manifest committed to content that does not exist,
//! which is an authoring defect, so the whole build aborts rather than
//! shipping a structurally broken page. `--strict` upgrades the first two
//! skips to errors for template authors who want the noise.
//!
//! ## One Write Per Page
//!
//! Each page document is accumulated in memory and written with a single
//! whole-file write. An aborted composition therefore never leaves a
//! partial page behind, and re-running a build overwrites output
//! byte-identically. There is no incremental rebuild and no parallelism:
//! pages compose one at a time in manifest order, which makes failure
//! order deterministic and staging trivially safe to share between pages.
//!
//! ## Preserved Format Quirks
//!
//! Existing template trees were authored against a composer with three
//! oddities: composed documents are never closed with `</body></html>`,
//! JS assets are staged into the `css/` output folder, and staged JS is
//! never linked with a `<script>` tag. These read like defects but are
//! load-bearing for byte-identical output against those trees, so they
//! are preserved and documented (see DESIGN.md) instead of fixed.

pub mod assets;
pub mod compose;
pub mod config;
pub mod content;
pub mod fragments;
pub mod manifest;
pub mod output;
pub mod parsers;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;

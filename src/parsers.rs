//! Per-extension source parsers.
//!
//! Every file discovered by the site walker is handed to the first parser
//! claiming its extension. Three parsers are registered by default:
//!
//! | Parser | Extensions | Effect |
//! |--------|------------|--------|
//! | [`ResourceParser`] | `jpg jpeg png gif css html` | copied verbatim, relative path preserved |
//! | [`MarkdownParser`] | `md markdown` | front matter split, body converted, `<stem>.html` written to the output root |
//! | [`TemplateParser`] | `json` | treated as a template manifest and composed |
//!
//! Files with no matching parser are ignored. Parsers own the full
//! handling of one file; the walker never looks at file contents.

use crate::compose::{self, ComposeError, ComposeOptions, ComposeReport};
use crate::content::Content;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// What one parser invocation did, for the build summary.
#[derive(Debug)]
pub enum ParseEvent {
    /// Resource copied as-is.
    Copied { source: PathBuf, dest: PathBuf },
    /// Markdown converted; `metadata` is the rendered front-matter map.
    Converted {
        source: PathBuf,
        dest: PathBuf,
        metadata: String,
    },
    /// Template manifest composed into pages.
    Composed(ComposeReport),
}

/// A handler for one family of file extensions.
pub trait Parser {
    /// Lowercase extensions, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Handle `path`. `source` and `dest` are the walk roots; parsers
    /// derive their own output locations from them.
    fn parse(&self, path: &Path, source: &Path, dest: &Path) -> Result<ParseEvent, ParseError>;

    fn matches(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|e| extension.eq_ignore_ascii_case(e))
    }
}

/// Copies static resources into the mirrored output location.
pub struct ResourceParser;

impl Parser for ResourceParser {
    fn extensions(&self) -> &'static [&'static str] {
        &["jpg", "jpeg", "png", "gif", "css", "html"]
    }

    fn parse(&self, path: &Path, source: &Path, dest: &Path) -> Result<ParseEvent, ParseError> {
        // Walked paths always live under the source root
        let rel = path.strip_prefix(source).unwrap_or(path);
        let target = dest.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target)?;
        Ok(ParseEvent::Copied {
            source: path.to_path_buf(),
            dest: target,
        })
    }
}

/// Converts Markdown sources into standalone HTML files at the output
/// root.
pub struct MarkdownParser;

impl Parser for MarkdownParser {
    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn parse(&self, path: &Path, _source: &Path, dest: &Path) -> Result<ParseEvent, ParseError> {
        let raw = fs::read_to_string(path)?;
        let content = Content::load(&raw);

        let mut html = String::new();
        let events = pulldown_cmark::Parser::new(&content.body);
        pulldown_cmark::html::push_html(&mut html, events);

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let target = dest.join(format!("{stem}.html"));
        fs::write(&target, html)?;

        Ok(ParseEvent::Converted {
            source: path.to_path_buf(),
            dest: target,
            metadata: content.to_string(),
        })
    }
}

/// Runs the page composer on template manifests.
pub struct TemplateParser {
    web_root: PathBuf,
    options: ComposeOptions,
}

impl TemplateParser {
    pub fn new(web_root: PathBuf, options: ComposeOptions) -> Self {
        Self { web_root, options }
    }
}

impl Parser for TemplateParser {
    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn parse(&self, path: &Path, _source: &Path, dest: &Path) -> Result<ParseEvent, ParseError> {
        let report = compose::compose_manifest(path, &self.web_root, dest, self.options)?;
        Ok(ParseEvent::Composed(report))
    }
}

//! Source tree walking and parser dispatch.
//!
//! [`Site::build`] walks the content directory and routes every file to
//! the parser registered for its extension (see [`crate::parsers`]).
//! Directories are mirrored into the output tree so resource copies can
//! preserve relative paths. Files nobody claims are left alone.
//!
//! ```text
//! content/                      dist/
//! ├── template.json       →     ├── <template>/home.html (composed)
//! ├── about.md            →     ├── about.html
//! ├── img/
//! │   └── logo.png        →     ├── img/logo.png
//! └── notes.txt                 └── (no parser — skipped)
//! ```
//!
//! The walk is deterministic: entries are visited in file-name order, one
//! at a time. The first error stops the build.

use crate::compose::ComposeOptions;
use crate::parsers::{
    MarkdownParser, ParseError, ParseEvent, Parser, ResourceParser, TemplateParser,
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Everything that happened during one build, in walk order.
#[derive(Debug)]
pub struct BuildReport {
    pub events: Vec<ParseEvent>,
}

/// One build invocation: a source root, a destination root, and the
/// parser registry.
pub struct Site {
    source: PathBuf,
    dest: PathBuf,
    parsers: Vec<Box<dyn Parser>>,
}

impl Site {
    /// A site with the default parser set. `web_root` is where template
    /// trees live; it is independent of `source` and is never walked.
    pub fn new(source: PathBuf, dest: PathBuf, web_root: PathBuf, options: ComposeOptions) -> Self {
        let parsers: Vec<Box<dyn Parser>> = vec![
            Box::new(ResourceParser),
            Box::new(MarkdownParser),
            Box::new(TemplateParser::new(web_root, options)),
        ];
        Self::with_parsers(source, dest, parsers)
    }

    /// A site with an explicit parser registry.
    pub fn with_parsers(source: PathBuf, dest: PathBuf, parsers: Vec<Box<dyn Parser>>) -> Self {
        Self {
            source,
            dest,
            parsers,
        }
    }

    fn parser_for(&self, extension: &str) -> Option<&dyn Parser> {
        self.parsers
            .iter()
            .find(|p| p.matches(extension))
            .map(|p| p.as_ref())
    }

    /// Walk the source tree and dispatch every file.
    pub fn build(&self) -> Result<BuildReport, SiteError> {
        fs::create_dir_all(&self.dest)?;

        let mut events = Vec::new();
        let walker = WalkDir::new(&self.source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e.path()));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            // Never re-ingest our own output
            if path.starts_with(&self.dest) {
                continue;
            }

            if entry.file_type().is_dir() {
                let rel = path.strip_prefix(&self.source).unwrap_or(path);
                if !rel.as_os_str().is_empty() {
                    fs::create_dir_all(self.dest.join(rel))?;
                }
                continue;
            }

            let Some(extension) = path.extension().map(|e| e.to_string_lossy()) else {
                continue;
            };
            if let Some(parser) = self.parser_for(&extension) {
                events.push(parser.parse(path, &self.source, &self.dest)?);
            }
        }

        Ok(BuildReport { events })
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

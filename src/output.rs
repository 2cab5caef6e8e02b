//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` (pure,
//! no I/O) and a `print_*` wrapper that writes to stdout, so display logic
//! is testable without capturing output.
//!
//! Display is grouped by what happened, not by walk order:
//!
//! ```text
//! Templates
//! 001 demo
//!     001 home → demo/home.html
//!
//! Pages
//! 001 about → about.html
//!     Metadata: {title: About}
//!
//! Resources
//! 001 img/logo.png
//!
//! Composed 1 page, converted 1 page, copied 1 resource
//! ```
//!
//! Skipped manifest pages are deliberately absent: a skip is a normal
//! outcome, not a diagnostic.

use crate::compose::{ComposeReport, PageOutcome};
use crate::manifest::Manifest;
use crate::parsers::ParseEvent;
use crate::site::BuildReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{pos:0>3}")
}

/// Singular or naive plural, with the count.
fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Render a path relative to `root` when possible, for stable display.
fn display_rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Build summary: composed templates, converted pages, copied resources.
pub fn format_build_output(report: &BuildReport, source: &Path, dest: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let mut composed_pages = 0;
    let mut converted = 0;
    let mut copied = 0;

    let templates: Vec<&ComposeReport> = report
        .events
        .iter()
        .filter_map(|e| match e {
            ParseEvent::Composed(r) => Some(r),
            _ => None,
        })
        .collect();
    if !templates.is_empty() {
        lines.push("Templates".to_string());
        for (i, template) in templates.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), template.template));
            for (j, page) in template.composed().enumerate() {
                if let PageOutcome::Composed { output } = &page.outcome {
                    composed_pages += 1;
                    lines.push(format!(
                        "    {} {} → {}",
                        format_index(j + 1),
                        page.name,
                        display_rel(output, dest)
                    ));
                }
            }
        }
        lines.push(String::new());
    }

    let pages: Vec<_> = report
        .events
        .iter()
        .filter_map(|e| match e {
            ParseEvent::Converted {
                source: src,
                dest: out,
                metadata,
            } => Some((src, out, metadata)),
            _ => None,
        })
        .collect();
    if !pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, (src, out, metadata)) in pages.iter().enumerate() {
            converted += 1;
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                display_rel(src, source),
                display_rel(out, dest)
            ));
            lines.push(format!("    Metadata: {metadata}"));
        }
        lines.push(String::new());
    }

    let resources: Vec<&Path> = report
        .events
        .iter()
        .filter_map(|e| match e {
            ParseEvent::Copied { source: src, .. } => Some(src.as_path()),
            _ => None,
        })
        .collect();
    if !resources.is_empty() {
        lines.push("Resources".to_string());
        for (i, src) in resources.iter().enumerate() {
            copied += 1;
            lines.push(format!(
                "{} {}",
                format_index(i + 1),
                display_rel(src, source)
            ));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "Composed {}, converted {}, copied {}",
        counted(composed_pages, "page"),
        counted(converted, "page"),
        counted(copied, "resource")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, source: &Path, dest: &Path) {
    for line in format_build_output(report, source, dest) {
        println!("{line}");
    }
}

/// Standalone compose summary for one manifest.
pub fn format_compose_report(report: &ComposeReport, dest: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.website {
        lines.push(format!("Template {}: nothing to compose", report.template));
        return lines;
    }

    lines.push(format!("Template {}", report.template));
    let mut composed = 0;
    for (i, page) in report.composed().enumerate() {
        if let PageOutcome::Composed { output } = &page.outcome {
            composed += 1;
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                page.name,
                display_rel(output, dest)
            ));
        }
    }
    lines.push(format!("Composed {}", counted(composed, "page")));
    lines
}

pub fn print_compose_report(report: &ComposeReport, dest: &Path) {
    for line in format_compose_report(report, dest) {
        println!("{line}");
    }
}

/// `check` summary: what the manifest declares, before any composition.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec![
        format!("Template {} (type: {})", manifest.template, manifest.kind),
        counted(manifest.pages.len(), "page"),
    ];
    for (i, page) in manifest.pages.iter().enumerate() {
        let divs: usize = page.sections.iter().map(|s| s.div.len()).sum();
        let navs = page.sections.iter().filter(|s| s.nav.is_some()).count();
        lines.push(format!(
            "{} {} ({}, {}, {})",
            format_index(i + 1),
            page.name,
            page.framework,
            counted(navs, "nav"),
            counted(divs, "div")
        ));
    }
    lines
}

pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{line}");
    }
}

//! Build configuration.
//!
//! Settings come from an optional `config.toml` in the working directory
//! (or an explicit `--config` path), with CLI flags taking precedence over
//! file values and built-in defaults filling the rest:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source = "content"   # Content directory walked by `build`
//! output = "dist"      # Output directory
//! web_root = "web"     # Root of the template trees
//! strict = false       # Error on framework/gate-file skips
//! ```
//!
//! Config files are sparse — set just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content directory walked by the build command.
    pub source: String,
    /// Output directory for the generated site.
    pub output: String,
    /// Root directory of the template trees.
    pub web_root: String,
    /// Treat framework-mismatch and missing-gate-file skips as errors.
    pub strict: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: "content".to_string(),
            output: "dist".to_string(),
            web_root: "web".to_string(),
            strict: false,
        }
    }
}

/// Load `config.toml` from `path`, falling back to defaults when the file
/// does not exist. A present-but-invalid file is an error, not a silent
/// default.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.is_file() {
        return Ok(SiteConfig::default());
    }
    let raw = fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// The documented stock config printed by `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    format!(
        r#"# sitewright configuration
# All options are optional - defaults shown below

# Content directory walked by `build`
source = "{}"

# Output directory
output = "{}"

# Root of the template trees (gate files, fragments, head assets)
web_root = "{}"

# Error on pages that would otherwise be skipped silently
# (unsupported framework, missing gate file)
strict = {}
"#,
        defaults.source, defaults.output, defaults.web_root, defaults.strict
    )
}

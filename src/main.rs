use clap::{Parser, Subcommand};
use sitewright::compose::ComposeOptions;
use sitewright::{compose, config, manifest, output, site};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "sitewright")]
#[command(about = "Static site generator with manifest-driven page composition")]
#[command(long_about = "\
Static site generator with manifest-driven page composition

Content files are dispatched by extension: Markdown becomes HTML, raw
resources are copied through, and JSON template manifests drive the page
composer, which assembles pages from reusable HTML fragments.

Content structure:

  content/
  ├── template.json                # Template manifest (composed)
  ├── about.md                     # Markdown page (converted)
  ├── style.css                    # Resource (copied as-is)
  └── img/
      └── logo.png                 # Resource (copied, path preserved)

Template trees (read-only input, separate from content):

  web/bootstrap/
  ├── main/<template>/
  │   ├── <page>.html              # Gate file: existence enables the page
  │   └── sections/
  │       ├── headers/*.html       # Navigation fragments
  │       ├── columns/*.html       # Header and body fragments
  │       └── footer/*.html        # Footer fragments
  └── head/<template>/
      ├── css/*                    # Stylesheet pool
      └── js/*                     # Script pool

Run 'sitewright gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory (overrides config.toml)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides config.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Template tree root (overrides config.toml)
    #[arg(long, global = true)]
    web_root: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Error on pages that would otherwise be skipped silently
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the content directory and build the full site
    Build,
    /// Compose a single template manifest
    Compose {
        /// Path to the manifest JSON file
        manifest: PathBuf,
    },
    /// Load and validate a template manifest without writing anything
    Check {
        /// Path to the manifest JSON file
        manifest: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// Effective settings: CLI flags over config file over defaults.
struct Settings {
    source: PathBuf,
    output: PathBuf,
    web_root: PathBuf,
    options: ComposeOptions,
}

impl Settings {
    fn resolve(cli: &Cli, file: config::SiteConfig) -> Self {
        Self {
            source: cli.source.clone().unwrap_or_else(|| file.source.into()),
            output: cli.output.clone().unwrap_or_else(|| file.output.into()),
            web_root: cli.web_root.clone().unwrap_or_else(|| file.web_root.into()),
            options: ComposeOptions {
                strict: cli.strict || file.strict,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let file_config = config::load_config(&cli.config)?;
    let settings = Settings::resolve(&cli, file_config);

    match &cli.command {
        Command::Build => {
            println!("==> Building {}", settings.source.display());
            let site = site::Site::new(
                settings.source.clone(),
                settings.output.clone(),
                settings.web_root.clone(),
                settings.options,
            );
            let report = site.build()?;
            output::print_build_output(&report, &settings.source, &settings.output);
            println!("==> Build complete: {}", settings.output.display());
        }
        Command::Compose { manifest } => {
            let report = compose::compose_manifest(
                manifest,
                &settings.web_root,
                &settings.output,
                settings.options,
            )?;
            output::print_compose_report(&report, &settings.output);
        }
        Command::Check { manifest } => {
            let loaded = manifest::load_manifest(manifest)?;
            output::print_check_output(&loaded);
            println!("==> Manifest is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

//! Kumanui CLI
//!
//! Thin wrapper around kumanui-tokens for working with the palette from a shell.
//!
//! ## Usage
//!
//! ```bash
//! # Check that every token resolves
//! kumanui validate
//!
//! # Inspect individual tokens
//! kumanui resolve semantics.terminal.selection palette.cyan.base
//!
//! # WCAG AA audit of the palette tiers (non-zero exit on failure with --strict)
//! kumanui check --strict
//!
//! # Resolved semantic schemes
//! kumanui scheme terminal
//! kumanui scheme web-dark
//!
//! # Banner and ANSI color list
//! kumanui demo
//!
//! # Palette version
//! kumanui version
//! ```

mod demo;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use kumanui_tokens::config::{DEFAULT_TOKENS_PATH, DEFAULT_VERSION_FILE};
use kumanui_tokens::{
    audit, resolve_all, Config, TerminalScheme, TokenDocument, WebMode, WebScheme,
};

/// Kumanui - palette tokens, contrast audit and terminal demo
#[derive(Parser)]
#[command(name = "kumanui")]
#[command(version)]
#[command(about = "Kumanui - palette tokens, contrast audit and terminal demo")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Token document
    #[arg(long, global = true, env = "KUMANUI_TOKENS", default_value = DEFAULT_TOKENS_PATH)]
    tokens: PathBuf,

    /// Companion version file (default: ./VERSION, if present)
    #[arg(long, global = true)]
    version_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every color entry in the document
    Validate,

    /// Show hex, RGBA, HSL and luminance for token paths
    Resolve {
        /// Dotted token paths, e.g. palette.cyan.base
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// WCAG AA contrast audit of the palette tiers
    Check {
        /// Exit non-zero if any color fails
        #[arg(long)]
        strict: bool,
    },

    /// Show a resolved semantic scheme
    Scheme {
        #[arg(value_enum, default_value_t = SchemeKind::Terminal)]
        kind: SchemeKind,
    },

    /// Banner and ANSI Standard/Bright color list
    Demo {
        /// Layout width (default: terminal width, at most 128)
        #[arg(long)]
        width: Option<usize>,
    },

    /// Print the palette version
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SchemeKind {
    Terminal,
    WebLight,
    WebDark,
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// An explicit `--version-file` is always used; otherwise `./VERSION` only if present.
fn build_config(tokens: PathBuf, version_file: Option<PathBuf>) -> Config {
    let mut config = Config::new(tokens);
    config.version_path = version_file.or_else(|| {
        let default = PathBuf::from(DEFAULT_VERSION_FILE);
        default.is_file().then_some(default)
    });
    config
}

fn load(config: &Config) -> Result<TokenDocument> {
    let document = config
        .load_document()
        .context("could not load the token document")?;
    tracing::info!(path = %config.tokens_path.display(), "loaded token document");
    Ok(document)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = build_config(cli.tokens, cli.version_file);

    match cli.command {
        Commands::Validate => {
            let document = load(&config)?;
            let resolved = resolve_all(&document)?;
            println!(
                "{} color tokens resolved in {}",
                resolved.len(),
                config.tokens_path.display()
            );
        }

        Commands::Resolve { paths } => {
            let document = load(&config)?;
            for (i, path) in paths.iter().enumerate() {
                let color = document.resolve_path(path)?;
                if i > 0 {
                    println!();
                }
                print!("{}", report::resolved(path, &color));
            }
        }

        Commands::Check { strict } => {
            let document = load(&config)?;
            let reports = audit(&document)?;
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", report::contrast(report));
            }

            let failed: usize = reports.iter().map(|r| r.failures().count()).sum();
            if failed > 0 {
                tracing::warn!(failed, "colors below the contrast threshold");
                if strict {
                    anyhow::bail!("{} color(s) failed the contrast check", failed);
                }
            }
        }

        Commands::Scheme { kind } => {
            let document = load(&config)?;
            let text = match kind {
                SchemeKind::Terminal => report::terminal(&TerminalScheme::from_document(&document)?),
                SchemeKind::WebLight => {
                    report::web(&WebScheme::from_document(&document, WebMode::Light)?)
                }
                SchemeKind::WebDark => {
                    report::web(&WebScheme::from_document(&document, WebMode::Dark)?)
                }
            };
            print!("{}", text);
        }

        Commands::Demo { width } => {
            let document = load(&config)?;
            print!("{}", demo::render(&document, width));
        }

        Commands::Version => {
            let version = config
                .load_version()?
                .context("no version file configured")?;
            println!("{}", version);
        }
    }

    Ok(())
}

//! # Kumanui Tokens - Palette Resolution and Color Math
//!
//! `kumanui-tokens` is the core of the Kumanui design-token pipeline. The
//! palette is declared once in a YAML token document; every output (stylesheet,
//! terminal profile, documentation, terminal demo) asks this crate for
//! concrete colors and formats them on its own.
//!
//! ## Core Concepts
//!
//! - [`TokenDocument`]: the typed token tree, loaded once per run
//! - [`ColorEntry`]: a hex literal or `{dotted.path}` reference, with optional alpha
//! - [`resolve`]: follows references to a [`ResolvedColor`]
//! - [`colorspace`]: hex, RGB, HSL, relative luminance and contrast ratio
//! - [`contrast::audit`]: WCAG AA check of the palette tiers
//! - [`TerminalScheme`] / [`WebScheme`]: resolved semantic colors per context
//! - [`Config`]: where the token document and version file live
//!
//! ## Token Documents
//!
//! ```rust
//! use kumanui_tokens::TokenDocument;
//!
//! let doc = TokenDocument::from_yaml(r##"
//! palette:
//!   black:
//!     dark: { value: "#101014" }
//!   cyan:
//!     base: { value: "#3fb8c8" }
//! semantics:
//!   terminal:
//!     background: { value: "{palette.black.dark}" }
//!     selection: { value: "{palette.cyan.base}", alpha: 0.35 }
//! "##).unwrap();
//!
//! let selection = doc.resolve_path("semantics.terminal.selection").unwrap();
//! assert_eq!(selection.hex(), "#3FB8C8");
//! assert_eq!(selection.alpha, 0.35);
//! ```
//!
//! ## Color Math
//!
//! ```rust
//! use kumanui_tokens::colorspace::{contrast_ratio, relative_luminance};
//!
//! assert!((relative_luminance("#FFFFFF").unwrap() - 1.0).abs() < 1e-9);
//! let ratio = contrast_ratio("#3FB8C8", "#101014").unwrap();
//! assert!(ratio > 4.5);
//! ```
//!
//! ## Failure Is Terminal
//!
//! Resolution never falls back to a default. A dangling reference, a path
//! that runs into something other than a color entry, a malformed hex value
//! or a reference chain that loops or runs too deep is a [`ResolutionError`]
//! naming the offending token.

pub mod colorspace;
pub mod config;
pub mod contrast;
pub mod document;
mod error;
pub mod palette;
pub mod resolve;
pub mod scheme;

pub use colorspace::{FormatError, Hsl, Rgb};
pub use config::Config;
pub use contrast::{audit, ContrastCheck, ContrastReport, WCAG_AA_NORMAL};
pub use document::{ColorEntry, ColorValue, Reference, TokenDocument, TokenNode};
pub use error::{DocumentError, ResolutionError, ResolutionErrorKind, Result, TokenError};
pub use palette::{PaletteSwatch, Tier, STANDARD_HUES};
pub use resolve::{resolve, resolve_all, resolve_path, ResolvedColor, MAX_REFERENCE_DEPTH};
pub use scheme::{NamedColor, TerminalScheme, WebMode, WebScheme, WebToken};

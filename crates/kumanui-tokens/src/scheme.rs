//! Resolved semantic schemes for the terminal and web contexts.
//!
//! These are the concrete colors an output generator needs: the terminal
//! profile colors plus sixteen ANSI slots, and the web light/dark variables.
//! Each color keeps a friendly name derived from the palette reference it was
//! declared with, so "Dark Black `#0A0A0A`" can be shown instead of a path.

use std::fmt;
use std::str::FromStr;

use crate::document::{ColorEntry, TokenDocument};
use crate::error::{ResolutionError, ResolutionErrorKind};
use crate::resolve::{resolve, ResolvedColor};

/// The ANSI slots in index order (0–7 standard, 8–15 bright).
pub const ANSI_SLOTS: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// A resolved color with the display name of its reference, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColor {
    pub name: Option<String>,
    pub color: ResolvedColor,
}

impl NamedColor {
    fn from_entry(document: &TokenDocument, path: &str, entry: &ColorEntry) -> Result<Self, ResolutionError> {
        let color = resolve(document, entry).map_err(|e| e.at(path))?;
        let name = entry.reference().map(|r| r.display_name());
        Ok(Self { name, color })
    }

    /// Name, or `fallback` for literals.
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} `{}`", name, self.color),
            None => write!(f, "`{}`", self.color),
        }
    }
}

fn named(document: &TokenDocument, path: &str) -> Result<NamedColor, ResolutionError> {
    let entry = document.entry(path)?;
    NamedColor::from_entry(document, path, entry)
}

fn ansi_row(document: &TokenDocument, group: &str) -> Result<[NamedColor; 8], ResolutionError> {
    let colors = ANSI_SLOTS
        .iter()
        .map(|slot| named(document, &format!("{}.{}", group, slot)))
        .collect::<Result<Vec<_>, _>>()?;
    colors.try_into().map_err(|_: Vec<NamedColor>| {
        ResolutionError::from(ResolutionErrorKind::NotAMapping {
            reference: group.to_string(),
            at: group.to_string(),
        })
    })
}

/// Colors for a terminal profile, from `semantics.terminal`.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalScheme {
    pub background: NamedColor,
    pub text: NamedColor,
    pub bold_text: NamedColor,
    pub selection: NamedColor,
    pub cursor: NamedColor,
    /// Always the background, so the glyph under the cursor stays legible.
    pub cursor_text: NamedColor,
    pub ansi_standard: [NamedColor; 8],
    pub ansi_bright: [NamedColor; 8],
}

impl TerminalScheme {
    pub fn from_document(document: &TokenDocument) -> Result<Self, ResolutionError> {
        const ROOT: &str = "semantics.terminal";
        let background = named(document, &format!("{ROOT}.background"))?;
        Ok(Self {
            text: named(document, &format!("{ROOT}.text"))?,
            bold_text: named(document, &format!("{ROOT}.boldText"))?,
            selection: named(document, &format!("{ROOT}.selection"))?,
            cursor: named(document, &format!("{ROOT}.cursor"))?,
            cursor_text: background.clone(),
            background,
            ansi_standard: ansi_row(document, &format!("{ROOT}.ansi.standard"))?,
            ansi_bright: ansi_row(document, &format!("{ROOT}.ansi.bright"))?,
        })
    }

    /// All sixteen ANSI colors, standard first.
    pub fn ansi(&self) -> impl Iterator<Item = &NamedColor> {
        self.ansi_standard.iter().chain(self.ansi_bright.iter())
    }
}

/// Light or dark web mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebMode {
    Light,
    Dark,
}

impl WebMode {
    pub fn key(self) -> &'static str {
        match self {
            WebMode::Light => "light",
            WebMode::Dark => "dark",
        }
    }
}

impl FromStr for WebMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(WebMode::Light),
            "dark" => Ok(WebMode::Dark),
            _ => Err(format!("unknown web mode '{}' (expected light or dark)", s)),
        }
    }
}

/// Flat web keys and their variable stems, in output order.
const WEB_KEYS: [(&str, &str); 10] = [
    ("background", "background"),
    ("surface", "surface"),
    ("text", "text"),
    ("mutedText", "muted-text"),
    ("heading", "heading"),
    ("link", "link"),
    ("linkHover", "link-hover"),
    ("border", "border"),
    ("accent", "accent"),
    ("selection", "selection"),
];

/// `code` subgroup keys and their variable stems.
const WEB_CODE_KEYS: [(&str, &str); 2] = [("bg", "code-bg"), ("text", "code-text")];

/// One web semantic token.
#[derive(Debug, Clone, PartialEq)]
pub struct WebToken {
    /// Kebab-case variable stem, e.g. `muted-text` or `code-bg`.
    pub stem: &'static str,
    /// Dotted document path.
    pub path: String,
    /// `(hue, tier)` when declared as a palette reference.
    pub palette_ref: Option<(String, String)>,
    pub color: NamedColor,
}

/// Web semantic tokens for one mode, from `semantics.web.<mode>`.
#[derive(Debug, Clone, PartialEq)]
pub struct WebScheme {
    pub mode: WebMode,
    pub tokens: Vec<WebToken>,
}

impl WebScheme {
    /// Keys absent from the document are skipped; declared keys must resolve.
    pub fn from_document(document: &TokenDocument, mode: WebMode) -> Result<Self, ResolutionError> {
        let root = format!("semantics.web.{}", mode.key());
        let keys = WEB_KEYS
            .iter()
            .map(|&(key, stem)| (format!("{}.{}", root, key), stem))
            .chain(
                WEB_CODE_KEYS
                    .iter()
                    .map(|&(key, stem)| (format!("{}.code.{}", root, key), stem)),
            );

        let mut tokens = Vec::new();
        for (path, stem) in keys {
            let Some(entry) = document.get(&path).and_then(|n| n.as_entry()) else {
                continue;
            };
            let palette_ref = entry
                .reference()
                .and_then(|r| r.palette_target())
                .map(|(hue, tier)| (hue.to_string(), tier.to_string()));
            let color = NamedColor::from_entry(document, &path, entry)?;
            tokens.push(WebToken {
                stem,
                path,
                palette_ref,
                color,
            });
        }

        tracing::debug!(mode = mode.key(), tokens = tokens.len(), "web scheme");
        Ok(Self { mode, tokens })
    }

    pub fn get(&self, stem: &str) -> Option<&WebToken> {
        self.tokens.iter().find(|t| t.stem == stem)
    }
}

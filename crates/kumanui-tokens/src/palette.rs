//! Hue and tier views over the `palette` subtree.

use std::fmt;
use std::str::FromStr;

use crate::colorspace::{Hsl, Rgb};
use crate::document::{capitalize, TokenDocument};
use crate::error::ResolutionError;
use crate::resolve::resolve_path;

/// The eight standard hues, in stylesheet and demo order.
pub const STANDARD_HUES: [&str; 8] = [
    "black", "white", "red", "green", "blue", "yellow", "magenta", "cyan",
];

/// A lightness variant of a hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Base,
    Light,
    Dark,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Base, Tier::Light, Tier::Dark];

    /// Key used in the token document.
    pub fn key(self) -> &'static str {
        match self {
            Tier::Base => "base",
            Tier::Light => "light",
            Tier::Dark => "dark",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Base => "Base",
            Tier::Light => "Light",
            Tier::Dark => "Dark",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(Tier::Base),
            "light" => Ok(Tier::Light),
            "dark" => Ok(Tier::Dark),
            _ => Err(format!("unknown tier '{}' (expected base, light or dark)", s)),
        }
    }
}

/// ANSI color index (0–7) for a standard hue.
pub fn ansi_index(hue: &str) -> Option<u8> {
    match hue {
        "black" => Some(0),
        "red" => Some(1),
        "green" => Some(2),
        "yellow" => Some(3),
        "blue" => Some(4),
        "magenta" => Some(5),
        "cyan" => Some(6),
        "white" => Some(7),
        _ => None,
    }
}

/// Dotted path of a palette entry.
pub fn palette_path(hue: &str, tier: Tier) -> String {
    format!("palette.{}.{}", hue, tier.key())
}

/// A resolved palette entry with its derived coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSwatch {
    pub hue: String,
    pub tier: Tier,
    pub rgb: Rgb,
    pub alpha: f64,
}

impl PaletteSwatch {
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }

    pub fn hsl(&self) -> Hsl {
        self.rgb.to_hsl()
    }

    /// "Dark Cyan" style label.
    pub fn name(&self) -> String {
        format!("{} {}", self.tier.label(), capitalize(&self.hue))
    }
}

fn swatch(document: &TokenDocument, hue: &str, tier: Tier) -> Result<PaletteSwatch, ResolutionError> {
    let color = resolve_path(document, &palette_path(hue, tier))?;
    Ok(PaletteSwatch {
        hue: hue.to_string(),
        tier,
        rgb: color.rgb,
        alpha: color.alpha,
    })
}

/// Resolves the given hues and tiers, tier-major.
///
/// Fails on the first missing or unresolvable entry.
pub fn swatches(
    document: &TokenDocument,
    hues: &[&str],
    tiers: &[Tier],
) -> Result<Vec<PaletteSwatch>, ResolutionError> {
    tiers
        .iter()
        .flat_map(|&tier| hues.iter().map(move |&hue| (hue, tier)))
        .map(|(hue, tier)| swatch(document, hue, tier))
        .collect()
}

/// Like [`swatches`], but skips entries the document does not declare.
///
/// Declared entries that fail to resolve are still errors.
pub fn swatches_lenient(
    document: &TokenDocument,
    hues: &[&str],
    tiers: &[Tier],
) -> Result<Vec<PaletteSwatch>, ResolutionError> {
    let mut out = Vec::new();
    for &tier in tiers {
        for &hue in hues {
            if document.get(&palette_path(hue, tier)).is_some() {
                out.push(swatch(document, hue, tier)?);
            }
        }
    }
    Ok(out)
}

/// Hex shown next to an ANSI Standard/Bright sample.
///
/// Bright uses the `light` tier and Standard the `base` tier, falling back
/// to `base`. Hues that are absent or unresolvable get a neutral default.
pub fn representative_hex(document: &TokenDocument, hue: &str, bright: bool) -> String {
    let preferred = if bright { Tier::Light } else { Tier::Base };
    [preferred, Tier::Base]
        .iter()
        .find_map(|&tier| resolve_path(document, &palette_path(hue, tier)).ok())
        .map(|color| color.hex())
        .unwrap_or_else(|| {
            tracing::debug!(hue, bright, "no palette entry; using neutral default");
            let fallback = if bright { "#FFFFFF" } else { "#EEEEEE" };
            fallback.to_string()
        })
}

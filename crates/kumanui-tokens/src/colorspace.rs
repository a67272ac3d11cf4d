//! sRGB color math for palette tokens.
//!
//! Everything here is a pure function over hex notation or RGB triples:
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`hex_to_rgb`] | integer channels, `0..=255` |
//! | [`hex_to_rgb_unit`] | normalized channels, `0.0..=1.0` |
//! | [`rgb_to_hsl`] / [`rgb_to_hsl_exact`] | hue in degrees, saturation and lightness in percent |
//! | [`srgb_channel_to_linear`] | linear-light channel value |
//! | [`relative_luminance`] | WCAG 2.x relative luminance |
//! | [`contrast_ratio`] | WCAG 2.x contrast ratio, `1.0..=21.0` |
//!
//! Hex input is case-insensitive, may carry a leading `#`, and must be 6
//! (`RRGGBB`) or 8 (`RRGGBBAA`) digits. The alpha pair of an 8-digit value
//! is ignored by the RGB conversions; [`parse_hex`] exposes it.
//!
//! # Example
//!
//! ```rust
//! use kumanui_tokens::colorspace::{contrast_ratio, hex_to_rgb, rgb_to_hsl, Rgb};
//!
//! let rgb = hex_to_rgb("#1e90ff").unwrap();
//! assert_eq!(rgb, Rgb(30, 144, 255));
//! assert_eq!(rgb.to_hex(), "#1E90FF");
//! assert_eq!(rgb_to_hsl(255, 255, 255), (0, 0, 100));
//!
//! let ratio = contrast_ratio("#FFFFFF", "#000000").unwrap();
//! assert!((ratio - 21.0).abs() < 1e-9);
//! ```

use std::fmt;

use thiserror::Error;

// ─── Errors ─────────────────────────────────────────────────────────────────

/// A hex color string that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The digit count is neither 6 nor 8.
    #[error("unsupported hex length: '{value}' (expected 6 or 8 digits)")]
    UnsupportedLength { value: String },

    /// A character outside `0-9a-fA-F`.
    #[error("invalid hex digit in '{value}'")]
    InvalidDigit { value: String },
}

// ─── RGB type ───────────────────────────────────────────────────────────────

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#RRGGBB` or `#RRGGBBAA`, discarding any alpha pair.
    pub fn from_hex(hex: &str) -> Result<Self, FormatError> {
        parse_hex(hex).map(|(rgb, _)| rgb)
    }

    /// Renders the canonical `#RRGGBB` form (uppercase, zero-padded).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_unit(self) -> [f64; 3] {
        [
            self.0 as f64 / 255.0,
            self.1 as f64 / 255.0,
            self.2 as f64 / 255.0,
        ]
    }

    /// Unrounded HSL for this color.
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl_exact(self.0, self.1, self.2)
    }

    /// WCAG relative luminance of this color.
    pub fn relative_luminance(self) -> f64 {
        let [r, g, b] = self.to_unit();
        LUMA_R * srgb_channel_to_linear(r)
            + LUMA_G * srgb_channel_to_linear(g)
            + LUMA_B * srgb_channel_to_linear(b)
    }

    /// WCAG contrast ratio against another color.
    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        ratio_of(self.relative_luminance(), other.relative_luminance())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

// ─── HSL type ───────────────────────────────────────────────────────────────

/// HSL coordinates: hue in degrees `[0, 360)`, saturation and lightness in
/// percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Rounds each component to the nearest integer for display.
    pub fn rounded(self) -> (u16, u8, u8) {
        (
            self.h.round() as u16,
            self.s.round() as u8,
            self.l.round() as u8,
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, s, l) = self.rounded();
        write!(f, "{}°, {}%, {}%", h, s, l)
    }
}

// ─── Hex parsing ────────────────────────────────────────────────────────────

/// Parses a hex color into its RGB channels and optional alpha byte.
///
/// Surrounding whitespace and a leading `#` are ignored.
pub fn parse_hex(hex: &str) -> Result<(Rgb, Option<u8>), FormatError> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if digits.len() != 6 && digits.len() != 8 {
        return Err(FormatError::UnsupportedLength {
            value: hex.to_string(),
        });
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidDigit {
            value: hex.to_string(),
        });
    }

    // All bytes are ASCII hex digits, so byte slicing and radix parsing hold.
    let pair = |i: usize| -> u8 { u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) };
    let rgb = Rgb(pair(0), pair(2), pair(4));
    let alpha = (digits.len() == 8).then(|| pair(6));
    Ok((rgb, alpha))
}

/// Integer RGB channels of a hex color.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, FormatError> {
    Rgb::from_hex(hex)
}

/// Normalized RGB channels (`0.0..=1.0`) of a hex color.
pub fn hex_to_rgb_unit(hex: &str) -> Result<[f64; 3], FormatError> {
    Rgb::from_hex(hex).map(Rgb::to_unit)
}

// ─── HSL conversion ─────────────────────────────────────────────────────────

/// Converts 8-bit RGB to unrounded HSL.
///
/// Achromatic input (`max == min`) has hue and saturation of zero.
pub fn rgb_to_hsl_exact(r: u8, g: u8, b: u8) -> Hsl {
    let [rf, gf, bf] = Rgb(r, g, b).to_unit();
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == rf {
        (gf - bf) / d + if gf < bf { 6.0 } else { 0.0 }
    } else if max == gf {
        (bf - rf) / d + 2.0
    } else {
        (rf - gf) / d + 4.0
    };

    Hsl {
        h: h / 6.0 * 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Converts 8-bit RGB to HSL rounded for display.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    rgb_to_hsl_exact(r, g, b).rounded()
}

// ─── Luminance & contrast ───────────────────────────────────────────────────

/// Rec. 709 luma coefficients used by WCAG relative luminance.
const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

/// Convert an sRGB channel (0.0–1.0) to linear light.
pub fn srgb_channel_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of a hex color, `0.0` (black) to `1.0` (white).
pub fn relative_luminance(hex: &str) -> Result<f64, FormatError> {
    Rgb::from_hex(hex).map(Rgb::relative_luminance)
}

/// WCAG contrast ratio between two hex colors. Symmetric in its inputs.
pub fn contrast_ratio(hex_a: &str, hex_b: &str) -> Result<f64, FormatError> {
    Ok(ratio_of(relative_luminance(hex_a)?, relative_luminance(hex_b)?))
}

fn ratio_of(la: f64, lb: f64) -> f64 {
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

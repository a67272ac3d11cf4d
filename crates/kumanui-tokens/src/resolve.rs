//! Resolution of color entries to concrete `(hex, alpha)` values.
//!
//! A color entry is either a hex literal or a `{dotted.path}` reference to
//! another entry. References are followed through the document until a
//! literal is reached. Chains are bounded: revisiting a path already on the
//! chain, or taking more than [`MAX_REFERENCE_DEPTH`] hops, is an error.
//!
//! # Alpha precedence
//!
//! 1. The entry's own `alpha`, when declared (including `0`).
//! 2. Otherwise the effective alpha of the reference target, which follows
//!    the same rule recursively and, at a literal, falls back to the
//!    embedded channel of an 8-digit hex.
//! 3. Otherwise `1.0`.
//!
//! ```rust
//! use kumanui_tokens::{resolve, ColorEntry, TokenDocument};
//!
//! let doc = TokenDocument::from_yaml(r##"
//! a: { value: "#112233", alpha: 0.5 }
//! b: { value: "{a}" }
//! c: { value: "{a}", alpha: 0.2 }
//! "##).unwrap();
//!
//! let b = resolve(&doc, doc.entry("b").unwrap()).unwrap();
//! assert_eq!(b.hex(), "#112233");
//! assert_eq!(b.alpha, 0.5);
//!
//! let c = resolve(&doc, &ColorEntry::new("{a}").with_alpha(0.2)).unwrap();
//! assert_eq!(c.alpha, 0.2);
//! ```

use std::fmt;

use crate::colorspace::{parse_hex, Hsl, Rgb};
use crate::document::{ColorEntry, ColorValue, TokenDocument, TokenNode};
use crate::error::{ResolutionError, ResolutionErrorKind};

/// Maximum number of reference hops followed from a single entry.
pub const MAX_REFERENCE_DEPTH: usize = 4;

/// A fully resolved color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedColor {
    pub rgb: Rgb,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl ResolvedColor {
    pub fn new(rgb: Rgb, alpha: f64) -> Self {
        Self { rgb, alpha }
    }

    /// Canonical `#RRGGBB`.
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }

    /// `#RRGGBBAA`, with alpha scaled to a byte.
    pub fn to_hex8(&self) -> String {
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("{}{:02X}", self.rgb.to_hex(), a)
    }

    /// Channels and alpha, each in `[0, 1]`.
    pub fn to_rgba_unit(&self) -> [f64; 4] {
        let [r, g, b] = self.rgb.to_unit();
        [r, g, b, self.alpha]
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    pub fn hsl(&self) -> Hsl {
        self.rgb.to_hsl()
    }

    pub fn relative_luminance(&self) -> f64 {
        self.rgb.relative_luminance()
    }

    /// Opacity as a whole percentage.
    pub fn opacity_percent(&self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

impl fmt::Display for ResolvedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.hex())
        } else {
            write!(f, "{} at {}% opacity", self.hex(), self.opacity_percent())
        }
    }
}

/// Resolves an entry against the document.
pub fn resolve(document: &TokenDocument, entry: &ColorEntry) -> Result<ResolvedColor, ResolutionError> {
    let mut chain = Vec::new();
    let (rgb, alpha) = resolve_chain(document, entry, &mut chain)?;
    Ok(ResolvedColor::new(rgb, alpha.unwrap_or(1.0)))
}

/// Resolves the entry at a dotted path, tagging failures with that path.
pub fn resolve_path(document: &TokenDocument, path: &str) -> Result<ResolvedColor, ResolutionError> {
    let entry = document.entry(path)?;
    resolve(document, entry).map_err(|e| e.at(path))
}

/// Resolves every entry in document order. The first failure aborts.
pub fn resolve_all(document: &TokenDocument) -> Result<Vec<(String, ResolvedColor)>, ResolutionError> {
    document
        .entries()
        .into_iter()
        .map(|(path, entry)| {
            tracing::trace!(token = %path, "resolving");
            let color = resolve(document, entry).map_err(|e| e.at(path.as_str()))?;
            Ok((path, color))
        })
        .collect()
}

/// Returns the color and the effective alpha, if any was declared on the way.
fn resolve_chain(
    document: &TokenDocument,
    entry: &ColorEntry,
    chain: &mut Vec<String>,
) -> Result<(Rgb, Option<f64>), ResolutionError> {
    match entry.color_value() {
        ColorValue::Literal(hex) => {
            let (rgb, embedded) = parse_hex(hex)?;
            let embedded = embedded.map(|a| a as f64 / 255.0);
            Ok((rgb, entry.alpha.or(embedded)))
        }
        ColorValue::Reference(reference) => {
            let path = reference.path();
            let revisits = chain.iter().any(|seen| seen == path);
            chain.push(path.to_string());
            if revisits || chain.len() > MAX_REFERENCE_DEPTH {
                return Err(ResolutionErrorKind::CycleOrTooDeep {
                    chain: chain.clone(),
                }
                .into());
            }

            tracing::debug!(reference = path, hop = chain.len(), "following reference");
            let target = match document.lookup(reference)? {
                TokenNode::Leaf(target) => target,
                _ => {
                    return Err(ResolutionErrorKind::NotAMapping {
                        reference: path.to_string(),
                        at: path.to_string(),
                    }
                    .into())
                }
            };

            let (rgb, inherited) = resolve_chain(document, target, chain)?;
            Ok((rgb, entry.alpha.or(inherited)))
        }
        ColorValue::Other(value) => Err(ResolutionErrorKind::NotAColorValue {
            value: value.to_string(),
        }
        .into()),
    }
}

impl TokenDocument {
    /// Shorthand for [`resolve`].
    pub fn resolve(&self, entry: &ColorEntry) -> Result<ResolvedColor, ResolutionError> {
        resolve(self, entry)
    }

    /// Shorthand for [`resolve_path`].
    pub fn resolve_path(&self, path: &str) -> Result<ResolvedColor, ResolutionError> {
        resolve_path(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> TokenDocument {
        TokenDocument::from_yaml(yaml).unwrap()
    }

    fn kind(result: Result<ResolvedColor, ResolutionError>) -> ResolutionErrorKind {
        result.unwrap_err().kind
    }

    // =====================================================================
    // Literals
    // =====================================================================

    #[test]
    fn literal_is_uppercased_with_default_alpha() {
        let d = doc("a: { value: \"#aabbcc\" }");
        let c = resolve_path(&d, "a").unwrap();
        assert_eq!(c.hex(), "#AABBCC");
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn literal_keeps_declared_alpha() {
        let d = doc("a: { value: \"#AABBCC\", alpha: 0.25 }");
        assert_eq!(resolve_path(&d, "a").unwrap().alpha, 0.25);
    }

    #[test]
    fn eight_digit_literal_uses_embedded_alpha() {
        let d = doc("a: { value: \"#11223300\" }");
        let c = resolve_path(&d, "a").unwrap();
        assert_eq!(c.hex(), "#112233");
        assert_eq!(c.alpha, 0.0);
    }

    #[test]
    fn declared_alpha_beats_embedded_alpha() {
        let d = doc("a: { value: \"#112233FF\", alpha: 0.3 }");
        assert_eq!(resolve_path(&d, "a").unwrap().alpha, 0.3);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        let d = doc("a: { value: \"#000000\" }");
        assert!(matches!(
            kind(resolve(&d, &ColorEntry::new("#12G"))),
            ResolutionErrorKind::UnsupportedHexLength { .. }
        ));
        assert!(matches!(
            kind(resolve(&d, &ColorEntry::new("#12345Z"))),
            ResolutionErrorKind::InvalidHexDigit { .. }
        ));
    }

    #[test]
    fn bare_name_is_not_a_color_value() {
        let d = doc("a: { value: \"#000000\" }");
        assert!(matches!(
            kind(resolve(&d, &ColorEntry::new("cyan"))),
            ResolutionErrorKind::NotAColorValue { .. }
        ));
    }

    // =====================================================================
    // References
    // =====================================================================

    #[test]
    fn single_hop_reference() {
        let d = doc("a: { value: \"#112233\" }\nb: { value: \"{a}\" }");
        let c = resolve_path(&d, "b").unwrap();
        assert_eq!(c.hex(), "#112233");
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn alpha_is_inherited_when_absent() {
        let d = doc("a: { value: \"#112233\", alpha: 0.5 }\nb: { value: \"{a}\" }");
        assert_eq!(resolve_path(&d, "b").unwrap().alpha, 0.5);
    }

    #[test]
    fn explicit_alpha_overrides_inherited() {
        let d = doc("a: { value: \"#112233\", alpha: 0.5 }\nb: { value: \"{a}\", alpha: 0.2 }");
        assert_eq!(resolve_path(&d, "b").unwrap().alpha, 0.2);
    }

    #[test]
    fn explicit_zero_alpha_is_not_overwritten() {
        let d = doc("a: { value: \"#112233\", alpha: 0.5 }\nb: { value: \"{a}\", alpha: 0 }");
        assert_eq!(resolve_path(&d, "b").unwrap().alpha, 0.0);
    }

    #[test]
    fn embedded_alpha_is_inherited_through_reference() {
        let d = doc("a: { value: \"#11223380\" }\nb: { value: \"{a}\" }");
        let alpha = resolve_path(&d, "b").unwrap().alpha;
        assert!((alpha - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn multi_hop_chain_within_limit() {
        let d = doc(
            "a: { value: \"#010203\" }
b: { value: \"{a}\" }
c: { value: \"{b}\", alpha: 0.4 }
d: { value: \"{c}\" }
e: { value: \"{d}\" }",
        );
        let c = resolve_path(&d, "e").unwrap();
        assert_eq!(c.hex(), "#010203");
        assert_eq!(c.alpha, 0.4);
    }

    #[test]
    fn chain_beyond_limit_is_rejected() {
        let d = doc(
            "a: { value: \"#010203\" }
b: { value: \"{a}\" }
c: { value: \"{b}\" }
d: { value: \"{c}\" }
e: { value: \"{d}\" }
f: { value: \"{e}\" }",
        );
        match kind(resolve_path(&d, "f")) {
            ResolutionErrorKind::CycleOrTooDeep { chain } => {
                assert_eq!(chain.len(), MAX_REFERENCE_DEPTH + 1)
            }
            other => panic!("expected CycleOrTooDeep, got {:?}", other),
        }
    }

    #[test]
    fn cycle_is_rejected() {
        let d = doc("a: { value: \"{b}\" }\nb: { value: \"{a}\" }");
        assert!(matches!(
            kind(resolve_path(&d, "a")),
            ResolutionErrorKind::CycleOrTooDeep { .. }
        ));
    }

    #[test]
    fn self_reference_is_rejected() {
        let d = doc("a: { value: \"{a}\" }");
        assert!(matches!(
            kind(resolve_path(&d, "a")),
            ResolutionErrorKind::CycleOrTooDeep { .. }
        ));
    }

    #[test]
    fn dangling_reference() {
        let d = doc("a: { value: \"#000000\" }");
        assert!(matches!(
            kind(resolve(&d, &ColorEntry::new("{missing.path}"))),
            ResolutionErrorKind::DanglingReference { .. }
        ));
    }

    #[test]
    fn reference_to_group_is_not_a_mapping() {
        let d = doc("palette:\n  red:\n    base: { value: \"#FF0000\" }\nx: { value: \"{palette.red}\" }");
        assert!(matches!(
            kind(resolve_path(&d, "x")),
            ResolutionErrorKind::NotAMapping { .. }
        ));
    }

    #[test]
    fn reference_to_scalar_is_not_a_mapping() {
        let d = doc("note: hello\nx: { value: \"{note}\" }");
        assert!(matches!(
            kind(resolve_path(&d, "x")),
            ResolutionErrorKind::NotAMapping { .. }
        ));
    }

    #[test]
    fn reference_to_bad_literal_reports_format() {
        let d = doc("a: { value: \"#12\" }\nb: { value: \"{a}\" }");
        let err = resolve_path(&d, "b").unwrap_err();
        assert_eq!(err.token.as_deref(), Some("b"));
        assert!(matches!(err.kind, ResolutionErrorKind::UnsupportedHexLength { .. }));
    }

    // =====================================================================
    // Whole document
    // =====================================================================

    #[test]
    fn resolve_all_in_order() {
        let d = doc("a: { value: \"#112233\" }\ng:\n  b: { value: \"{a}\", alpha: 0.1 }");
        let all = resolve_all(&d).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, "a");
        assert_eq!(all[1].0, "g.b");
        assert_eq!(all[1].1.alpha, 0.1);
    }

    #[test]
    fn resolve_all_names_offending_token() {
        let d = doc("a: { value: \"#112233\" }\ng:\n  b: { value: \"{nope}\" }");
        let err = resolve_all(&d).unwrap_err();
        assert_eq!(err.token.as_deref(), Some("g.b"));
        assert!(err.to_string().contains("g.b"));
    }

    // =====================================================================
    // ResolvedColor
    // =====================================================================

    #[test]
    fn rgba_unit_carries_alpha() {
        let [r, g, b, a] = ResolvedColor::new(Rgb(255, 0, 51), 0.25).to_rgba_unit();
        assert_eq!((r, g, a), (1.0, 0.0, 0.25));
        assert!((b - 0.2).abs() < 1e-9);
    }

    #[test]
    fn hex8_and_display() {
        let c = ResolvedColor::new(Rgb(0x11, 0x22, 0x33), 0.5);
        assert_eq!(c.to_hex8(), "#11223380");
        assert_eq!(c.to_string(), "#112233 at 50% opacity");
        assert_eq!(ResolvedColor::new(Rgb(0, 0, 0), 1.0).to_string(), "#000000");
    }
}

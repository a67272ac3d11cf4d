//! WCAG contrast audit of the palette.
//!
//! The standard audit checks the `base` tier of every standard hue against
//! the dark background (`palette.black.dark`), and the `dark` tier against
//! the light background (`palette.white.light`).

use crate::colorspace::Rgb;
use crate::document::{capitalize, TokenDocument};
use crate::error::ResolutionError;
use crate::palette::{palette_path, swatches, Tier, STANDARD_HUES};
use crate::resolve::resolve_path;

/// Minimum contrast for normal-size text under WCAG 2.x level AA.
pub const WCAG_AA_NORMAL: f64 = 4.5;

/// One foreground checked against a background.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastCheck {
    /// "Red Base" style label.
    pub label: String,
    pub rgb: Rgb,
    pub ratio: f64,
    pub passes: bool,
}

impl ContrastCheck {
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }
}

/// All checks against a single background.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastReport {
    pub background_label: String,
    pub background: Rgb,
    pub threshold: f64,
    pub checks: Vec<ContrastCheck>,
}

impl ContrastReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passes)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ContrastCheck> {
        self.checks.iter().filter(|c| !c.passes)
    }
}

/// Checks one tier of the standard hues against the entry at `background_path`.
pub fn audit_against(
    document: &TokenDocument,
    background_path: &str,
    background_label: &str,
    tier: Tier,
    threshold: f64,
) -> Result<ContrastReport, ResolutionError> {
    let background = resolve_path(document, background_path)?.rgb;
    let checks = swatches(document, &STANDARD_HUES, &[tier])?
        .into_iter()
        .map(|swatch| {
            let ratio = swatch.rgb.contrast_ratio(background);
            ContrastCheck {
                label: format!("{} {}", capitalize(&swatch.hue), swatch.tier.label()),
                rgb: swatch.rgb,
                ratio,
                passes: ratio >= threshold,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        background = background_path,
        checked = checks.len(),
        failed = checks.iter().filter(|c| !c.passes).count(),
        "contrast audit"
    );

    Ok(ContrastReport {
        background_label: background_label.to_string(),
        background,
        threshold,
        checks,
    })
}

/// The standard two-background audit at the AA threshold.
pub fn audit(document: &TokenDocument) -> Result<[ContrastReport; 2], ResolutionError> {
    let dark = audit_against(
        document,
        &palette_path("black", Tier::Dark),
        "Black Dark",
        Tier::Base,
        WCAG_AA_NORMAL,
    )?;
    let light = audit_against(
        document,
        &palette_path("white", Tier::Light),
        "White Light",
        Tier::Dark,
        WCAG_AA_NORMAL,
    )?;
    Ok([dark, light])
}

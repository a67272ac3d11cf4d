//! Plain-text views of resolved tokens, contrast reports and schemes.

use std::fmt::Write;

use kumanui_tokens::{ContrastReport, NamedColor, ResolvedColor, Rgb, TerminalScheme, WebScheme};

/// One resolved token: hex, RGBA, HSL and luminance.
pub fn resolved(path: &str, color: &ResolvedColor) -> String {
    let (h, s, l) = color.hsl().rounded();
    let mut out = String::new();
    let _ = writeln!(out, "{}", path);
    let _ = writeln!(out, "  hex        {}", color.hex());
    let _ = writeln!(out, "  rgba       {}", color.to_hex8());
    let _ = writeln!(out, "  rgb        {}", color.rgb);
    let _ = writeln!(out, "  alpha      {:.2}", color.alpha);
    let _ = writeln!(out, "  hsl        {}°, {}%, {}%", h, s, l);
    let _ = writeln!(out, "  luminance  {:.4}", color.relative_luminance());
    out
}

/// "Dark" when white text reads better than black on `background`.
fn tone(background: Rgb) -> &'static str {
    if background.contrast_ratio(Rgb(255, 255, 255)) >= background.contrast_ratio(Rgb(0, 0, 0)) {
        "Dark"
    } else {
        "Light"
    }
}

/// Contrast rows in `Name, Hex, Contrast, Pass(4.5)` form.
pub fn contrast(report: &ContrastReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} background ({} {})",
        tone(report.background),
        report.background_label,
        report.background.to_hex()
    );
    let _ = writeln!(out, "Name, Hex, Contrast, Pass({})", report.threshold);
    for check in &report.checks {
        let _ = writeln!(
            out,
            "{}, {}, {:.2}, {}",
            check.label,
            check.hex(),
            check.ratio,
            if check.passes { "PASS" } else { "FAIL" }
        );
    }
    out
}

fn row(out: &mut String, label: &str, color: &NamedColor) {
    let _ = writeln!(out, "  {:<14}{}", label, color);
}

pub fn terminal(scheme: &TerminalScheme) -> String {
    let mut out = String::from("Terminal scheme\n");
    row(&mut out, "Background", &scheme.background);
    row(&mut out, "Text", &scheme.text);
    row(&mut out, "Bold Text", &scheme.bold_text);
    row(&mut out, "Selection", &scheme.selection);
    row(&mut out, "Cursor", &scheme.cursor);
    row(&mut out, "Cursor Text", &scheme.cursor_text);
    for (i, color) in scheme.ansi().enumerate() {
        row(&mut out, &format!("ANSI {}", i), color);
    }
    out
}

pub fn web(scheme: &WebScheme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Web scheme ({})", scheme.mode.key());
    for token in &scheme.tokens {
        let _ = write!(out, "  {:<14}{}", token.stem, token.color.color);
        if let Some((hue, tier)) = &token.palette_ref {
            let _ = write!(out, "  ({}.{})", hue, tier);
        }
        out.push('\n');
    }
    out
}

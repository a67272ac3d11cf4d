//! Terminal showcase: block-letter banner and ANSI Standard/Bright list.
//!
//! Only the 16 basic ANSI colors are used (SGR 30–37/90–97 and 40–47/100–107),
//! so the demo reflects whatever palette the terminal profile has installed
//! instead of forcing truecolor values.

use console::{measure_text_width, pad_str, Alignment};
use kumanui_tokens::document::capitalize;
use kumanui_tokens::palette::{ansi_index, representative_hex};
use kumanui_tokens::{TokenDocument, STANDARD_HUES};

pub const BANNER_TEXT: &str = "Kumanui";

/// Widest layout the ANSI list will use, even on wider terminals.
pub const MAX_WIDTH: usize = 128;

const MIN_COLUMN_WIDTH: usize = 18;
const COLUMN_GAP: usize = 2;
const GLYPH_ROWS: usize = 6;
const GLYPH_WIDTH: usize = 7;
const LETTER_GAP: usize = 2;

const RESET: &str = "\x1b[0m";

/// Letter hues, cycled.
const HUE_CYCLE: [&str; 7] = ["red", "green", "blue", "magenta", "cyan", "yellow", "white"];

fn glyph(ch: char) -> Option<[&'static str; GLYPH_ROWS]> {
    let rows = match ch.to_ascii_uppercase() {
        'K' => ["##   ##", "##  ## ", "#####  ", "##  ## ", "##   ##", "##   ##"],
        'U' => ["##   ##", "##   ##", "##   ##", "##   ##", "##   ##", " ##### "],
        'M' => ["##   ##", "### ###", "## # ##", "##   ##", "##   ##", "##   ##"],
        'A' => [" ##### ", "##   ##", "#######", "##   ##", "##   ##", "##   ##"],
        'N' => ["##   ##", "###  ##", "#### ##", "## ####", "##  ###", "##   ##"],
        'I' => ["#######", "  ##   ", "  ##   ", "  ##   ", "  ##   ", "#######"],
        _ => return None,
    };
    Some(rows)
}

fn sgr(code: u8) -> String {
    format!("\x1b[{}m", code)
}

fn slot(hue: &str) -> u8 {
    ansi_index(hue).unwrap_or(7)
}

/// Renders `text` in block letters, one hue per letter.
///
/// Filled cells alternate bright and standard foreground by column within the
/// letter. Characters without a glyph render as blank space.
pub fn render_banner(text: &str) -> String {
    let mut lines = vec![String::new(); GLYPH_ROWS];

    for (idx, ch) in text.chars().enumerate() {
        let hue = HUE_CYCLE[idx % HUE_CYCLE.len()];
        let pattern = glyph(ch);

        for (r, line) in lines.iter_mut().enumerate() {
            if idx > 0 {
                line.push_str(&"  ".repeat(LETTER_GAP));
            }
            let Some(pattern) = pattern else {
                line.push_str(&"  ".repeat(GLYPH_WIDTH));
                continue;
            };
            for (c, cell) in pattern[r].chars().enumerate() {
                if cell == '#' {
                    let base = if c % 2 == 0 { 90 } else { 30 };
                    let code = base + slot(hue);
                    line.push_str(&sgr(code));
                    line.push_str("██");
                    line.push_str(RESET);
                } else {
                    line.push_str("  ");
                }
            }
        }
    }

    lines.join("\n")
}

/// Three-line Standard/Bright block per standard hue.
fn hue_blocks(document: &TokenDocument) -> Vec<[String; 3]> {
    STANDARD_HUES
        .iter()
        .map(|&hue| {
            let i = slot(hue);
            let title = format!("{}:", capitalize(hue));
            let standard = format!(
                "  {}  {} Standard {}",
                sgr(40 + i),
                RESET,
                representative_hex(document, hue, false)
            );
            let bright = format!(
                "  {}  {} Bright   {}",
                sgr(100 + i),
                RESET,
                representative_hex(document, hue, true)
            );
            [title, standard, bright]
        })
        .collect()
}

/// The ANSI list laid out in as many columns as fit `total_width`.
pub fn render_ansi_list(document: &TokenDocument, total_width: usize) -> String {
    let blocks = hue_blocks(document);

    let col_width = blocks
        .iter()
        .flat_map(|block| block.iter())
        .map(|line| measure_text_width(line))
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN_WIDTH);
    let cols = (total_width / (col_width + COLUMN_GAP)).max(1);
    tracing::debug!(col_width, cols, total_width, "ansi list layout");

    let mut out = String::from("ANSI colors (Standard/Bright):\n\n");
    for row in blocks.chunks(cols) {
        for line_idx in 0..3 {
            let pieces: Vec<_> = row
                .iter()
                .map(|block| pad_str(&block[line_idx], col_width, Alignment::Left, None))
                .collect();
            out.push_str(&pieces.join(&" ".repeat(COLUMN_GAP)));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Current terminal width, or None if not available.
fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

/// Layout width: the requested width (or the terminal's), capped at [`MAX_WIDTH`].
pub fn layout_width(requested: Option<usize>) -> usize {
    requested
        .or_else(terminal_width)
        .unwrap_or(MAX_WIDTH)
        .min(MAX_WIDTH)
}

/// Full demo: banner followed by the ANSI list.
pub fn render(document: &TokenDocument, width: Option<usize>) -> String {
    format!(
        "\n\n{}\n\n\n{}",
        render_banner(BANNER_TEXT),
        render_ansi_list(document, layout_width(width))
    )
}

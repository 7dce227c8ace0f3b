// Width handling shared by the renderers. Widths are terminal cells as
// lipgloss measures them: escape sequences count zero, wide glyphs two.

use lipgloss::Style;

const RESET: &str = "\x1b[0m";

/// Visible width of `s` in cells.
pub fn visible_width(s: &str) -> usize {
    lipgloss::width(s)
}

/// Cut or pad `s` to exactly `width` cells, on one line.
pub fn fit_width(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let w = width as i32;
    let mut out = Style::new().inline(true).max_width(w).render(s);
    // a cut inside styled text leaves the style open
    if out.contains('\x1b') && visible_width(s) > width {
        out.push_str(RESET);
    }
    // a wide glyph that does not fit is dropped whole, the pad fills the gap
    Style::new().width(w).render(&out)
}

/// Like [`fit_width`] without padding, and with an ellipsis on overflow.
pub fn clip(s: &str, width: usize) -> String {
    if visible_width(s) <= width {
        return s.to_string();
    }
    match width {
        0 => String::new(),
        1 => "…".to_string(),
        _ => {
            let mut out = Style::new()
                .inline(true)
                .max_width(width as i32 - 1)
                .render(s);
            out.push('…');
            out
        }
    }
}

/// Word wrap of plain text at `width` cells. Words longer than a line are
/// broken across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if width == 0 || words.is_empty() {
        return Vec::new();
    }
    Style::new()
        .width(width as i32)
        .render(&words.join(" "))
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Exactly `per` lines of exactly `total_width` cells.
pub fn normalize_and_pad(lines: Vec<String>, total_width: usize, per: usize) -> Vec<String> {
    let mut normalized: Vec<String> = lines
        .into_iter()
        .take(per)
        .map(|l| fit_width(&l, total_width))
        .collect();
    let blank = fit_width("", total_width);
    normalized.resize(per, blank);
    normalized
}

/// Left and right parts on one line, with the gap filled.
pub fn spread(left: &str, right: &str, width: usize) -> String {
    let lw = visible_width(left);
    let rw = visible_width(right);
    if lw + rw >= width {
        return fit_width(&format!("{left}{right}"), width);
    }
    format!("{left}{}{right}", " ".repeat(width - lw - rw))
}

//! Shared rendering utilities.
//!
//! Cursor positioning, width-aware padding and query-match highlighting used
//! by several components.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of spaces needed to center `text_len` in `cols`, and the trailing fill.
#[must_use]
pub const fn centered_padding(text_len: usize, cols: usize) -> (usize, usize) {
    let text_len = if text_len > cols { cols } else { text_len };
    let left = (cols - text_len) / 2;
    (left, cols - text_len - left)
}

/// Truncates `text` to at most `max` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Prints `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices with exclusive end, sorted and
/// non-overlapping. Out-of-range ends are clamped. Highlighting is skipped on
/// the selected row so the selection colors stay intact.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal: String = chars[current_pos..start].iter().collect();
        print!("{normal}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_and_clamps() {
        assert_eq!(centered_padding(4, 10), (3, 3));
        assert_eq!(centered_padding(5, 10), (2, 3));
        assert_eq!(centered_padding(20, 10), (0, 0));
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("rust-lang/rust-analyzer", 12), "rust-lang...");
        assert_eq!(truncate("ünïcödé-repo", 6), "ünï...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}

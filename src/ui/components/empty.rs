//! Empty state component renderer.
//!
//! Shown in place of the result list while the first page loads, and as the
//! prompt when there are no results.

use crate::ui::helpers::{centered_padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centered message one row below `row` and returns the next row.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let (left, right) = centered_padding(empty.message.chars().count(), cols);

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(left));
    print!("{}", empty.message);
    print!("{}", " ".repeat(right));
    print!("{}", Theme::reset());

    row + 2
}

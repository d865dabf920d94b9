//! Error banner component renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ErrorBanner;

/// Renders the two-line error banner at `row` and returns the next row.
///
/// ```text
///  Something Wrong!
///  GitHub API error (403): API rate limit exceeded
/// ```
pub fn render_error_banner(row: usize, banner: &ErrorBanner, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(1);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    let title = truncate(&banner.title, width);
    print!(" {title}");
    print!("{}", " ".repeat(width.saturating_sub(title.chars().count())));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.error_fg));
    let message = truncate(&banner.message, width);
    print!(" {message}");
    print!("{}", " ".repeat(width.saturating_sub(message.chars().count())));
    print!("{}", Theme::reset());

    row + 2
}

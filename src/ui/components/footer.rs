//! Footer component renderers: keybinding help and the list trailer.

use crate::ui::helpers::{centered_padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, ListFooter};

/// Renders centered, dimmed keybinding hints at `row` and returns the next row.
///
/// Text wider than the pane is cut off rather than wrapped.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text: String = footer.keybindings.chars().take(cols).collect();
    let (left, right) = centered_padding(help_text.chars().count(), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(left));
    print!("{help_text}");
    print!("{}", " ".repeat(right));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the trailer under the result list at `row`.
pub fn render_list_footer(row: usize, list_footer: ListFooter, theme: &Theme, cols: usize) -> usize {
    let text = list_footer.text();
    let (left, right) = centered_padding(text.len(), cols);

    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(left));
    print!("{text}");
    print!("{}", " ".repeat(right));
    print!("{}", Theme::reset());
    row + 1
}

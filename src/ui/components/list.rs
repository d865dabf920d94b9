//! Result list renderer.
//!
//! One row per repository:
//!
//! ```text
//! NAME                                        STARS  LANGUAGE     UPDATED
//! facebook/react                               220k  JavaScript   2h ago
//! ```

use crate::ui::helpers::{self, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Width reserved for the stars, language and updated columns.
const META_WIDTH: usize = 30;
const STARS_WIDTH: usize = 7;
const LANGUAGE_WIDTH: usize = 12;
const UPDATED_WIDTH: usize = 9;

/// Width left for the NAME column.
fn name_width(cols: usize) -> usize {
    cols.saturating_sub(META_WIDTH).max(10)
}

/// Renders the column titles at `row` and returns the next row.
pub fn render_list_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<name$}{:>stars$}  {:<lang$}{:<upd$}",
        "NAME",
        "STARS",
        "LANGUAGE",
        "UPDATED",
        name = name_width(cols),
        stars = STARS_WIDTH,
        lang = LANGUAGE_WIDTH,
        upd = UPDATED_WIDTH,
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every visible row starting at `row` and returns the next row.
pub fn render_list_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    items
        .iter()
        .fold(row, |current_row, item| render_list_row(current_row, item, theme, cols))
}

/// Renders one repository row.
///
/// The selected row gets the selection colors across the full width; query
/// highlights are drawn only on unselected rows.
fn render_list_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let name_col = name_width(cols);

    position_cursor(row, 1);

    let base_style = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base_style}");

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(name_col.saturating_sub(item.name.chars().count())));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }
    print!("{:>width$}  ", item.stars, width = STARS_WIDTH);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    let language = truncate(&item.language, LANGUAGE_WIDTH - 1);
    print!("{language:<width$}", width = LANGUAGE_WIDTH);
    print!("{:<width$}", item.updated, width = UPDATED_WIDTH);

    let line_len = name_col.max(item.name.chars().count()) + STARS_WIDTH + 2 + LANGUAGE_WIDTH + UPDATED_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

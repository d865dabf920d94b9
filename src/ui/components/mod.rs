//! Composable UI component renderers.
//!
//! - [`header`]: Title bar with result count
//! - [`search`]: Search input box
//! - [`banner`]: Error banner
//! - [`list`]: Repository rows with NAME, STARS, LANGUAGE, UPDATED columns
//! - [`empty`]: Loading / prompt message
//! - [`footer`]: List trailer and keybinding hints
//!
//! [`render_layout`] stacks them into the full pane.

mod banner;
mod empty;
mod footer;
mod header;
mod list;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, ViewStatus};

use banner::render_error_banner;
use empty::render_empty_state;
use footer::{render_footer, render_list_footer};
use header::render_header;
use list::{render_list_headers, render_list_rows};
use search::render_search_bar;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full pane.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Error banner - 2 lines, if any]
/// [Column titles + rows + list trailer] or [loading / prompt message]
/// [Border]
/// [Footer]
/// ```
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    match &vm.status {
        ViewStatus::Loading | ViewStatus::Prompt => render_body_message(current_row, vm, theme, cols),
        ViewStatus::Results { .. } => render_results(current_row, vm, theme, cols),
        ViewStatus::Error { .. } => {
            if let Some(banner) = &vm.error_banner {
                current_row = render_error_banner(current_row, banner, theme, cols);
            }
            if vm.empty_state.is_some() {
                render_body_message(current_row, vm, theme, cols);
            } else {
                render_results(current_row, vm, theme, cols);
            }
        }
    }

    let footer_row = rows.saturating_sub(1).max(1);
    render_border(footer_row.saturating_sub(1).max(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

fn render_body_message(row: usize, vm: &UIViewModel, theme: &Theme, cols: usize) {
    if let Some(empty) = &vm.empty_state {
        render_empty_state(row, empty, theme, cols);
    }
}

/// Column titles, visible rows and the list trailer.
fn render_results(row: usize, vm: &UIViewModel, theme: &Theme, cols: usize) {
    let row = render_list_headers(row, theme, cols);
    let row = render_list_rows(row, &vm.display_items, theme, cols);
    if let Some(list_footer) = vm.list_footer {
        render_list_footer(row, list_footer, theme, cols);
    }
}

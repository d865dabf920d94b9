//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI on stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin pane to stdout.
///
/// Zellij captures stdout of the `render` callback as the pane contents.
/// Nothing is cleared; every component pads its lines to the full width.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    tracing::trace!(
        status = ?viewmodel.status,
        visible_rows = viewmodel.display_items.len(),
        "rendering frame"
    );

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}

//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use reposcout::app::state::{AppState, SearchSettings};
//! use reposcout::ui::{Theme, ViewStatus};
//!
//! let state = AppState::new(SearchSettings::default(), Theme::default());
//! let vm = state.compute_viewmodel(24, 80);
//! assert_eq!(vm.status, ViewStatus::Prompt);
//! ```

/// What the pane is showing, projected from the search state.
///
/// This is the pure projection of the controller state; the remaining
/// fields of [`UIViewModel`] are the display details for each case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// The last request failed.
    Error {
        message: String,
    },
    /// The first page of a query is in flight.
    Loading,
    /// Nothing to show yet.
    Prompt,
    /// Results are listed.
    Results {
        /// Another page is in flight.
        fetching_more: bool,
    },
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub status: ViewStatus,

    /// Header information (title with result count).
    pub header: HeaderInfo,

    /// Search input echo; always shown.
    pub search_bar: SearchBarInfo,

    /// Error banner, shown above whatever the list area holds.
    pub error_banner: Option<ErrorBanner>,

    /// Loading or prompt message, shown instead of the list.
    pub empty_state: Option<EmptyState>,

    /// Visible window of result rows.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Trailer under the list; present whenever rows are listed.
    pub list_footer: Option<ListFooter>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Display information for a single repository row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Repository full name, truncated to fit.
    pub name: String,

    pub stars: String,

    pub language: String,

    /// Relative last-update time, empty if unknown.
    pub updated: String,

    pub is_selected: bool,

    /// Character ranges of `name` matching the query, `(start, end)` with
    /// exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Centered message shown when there is no list to draw.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
}

/// Error banner contents.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    pub title: String,
    pub message: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Trailer rendered beneath the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFooter {
    /// A next page is in flight.
    FetchingMore,
    /// Idle; scrolling past the end loads the next page.
    ScrollForMore,
}

impl ListFooter {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::FetchingMore => "fetching more...",
            Self::ScrollForMore => "scroll down to fetch more...",
        }
    }
}

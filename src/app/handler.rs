//! Event handling and request orchestration.
//!
//! [`handle_event`] is the single serialization point of the controller: the
//! plugin runtime calls it once per event, it applies a complete state
//! transition, and returns the side effects to run. Nothing else mutates the
//! search state.
//!
//! # Request pipeline
//!
//! ```text
//! Char/Backspace/SetSearchText ─▶ new generation ─▶ ScheduleDebounce(ticket)
//!                                                        │
//! DebounceElapsed(ticket) ── latest ticket only ─▶ StartFetching ─▶ Search(page 1)
//! ReachedScrollEnd ── results, idle ─────────────▶ FetchingMore  ─▶ Search(page + 1)
//! SearchCompleted(tag) ── tag still current ─────▶ replace / append / error
//! ```
//!
//! # Example
//!
//! ```rust
//! use reposcout::app::{handle_event, AppState, Event};
//! use reposcout::app::state::SearchSettings;
//! use reposcout::Theme;
//!
//! let mut state = AppState::new(SearchSettings::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::SetSearchText("react".into()))?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), reposcout::RepoScoutError>(())
//! ```

use super::request::{RequestKind, RequestTag};
use super::state::Transition;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::RepositoryItem;
use crate::github::SearchRequest;

/// Outcome of a search request: a page of items or an error message.
pub type SearchOutcome = std::result::Result<Vec<RepositoryItem>, String>;

/// Events triggered by user input, timers, or completed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the search text.
    Char(char),
    /// Removes the last character of the search text.
    Backspace,
    /// Clears the search text.
    ClearSearch,
    /// Replaces the search text.
    SetSearchText(String),

    /// Moves the selection down; past the last row this is a scroll end.
    KeyDown,
    /// Moves the selection up.
    KeyUp,
    /// The list was scrolled to its end.
    ReachedScrollEnd,

    /// Hides the plugin pane.
    CloseFocus,

    /// A debounce timer elapsed.
    DebounceElapsed {
        ticket: u64,
    },

    /// A search request resolved.
    SearchCompleted {
        tag: RequestTag,
        outcome: SearchOutcome,
    },

    /// The user answered the permission prompt.
    PermissionsResult {
        granted: bool,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI should re-render, and the actions to run in order.
///
/// # Errors
///
/// Returns an error if a search request cannot be built for the current
/// state. State has already been updated when this happens.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Char(c) => {
            let mut text = state.search.search_text.clone();
            text.push(*c);
            Ok(set_search_text(state, text))
        }
        Event::Backspace => {
            let mut text = state.search.search_text.clone();
            if text.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok(set_search_text(state, text))
        }
        Event::ClearSearch => Ok(set_search_text(state, String::new())),
        Event::SetSearchText(text) => Ok(set_search_text(state, text.clone())),
        Event::KeyDown => {
            if state.move_selection_down() {
                reached_scroll_end(state)
            } else {
                Ok((true, vec![]))
            }
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::ReachedScrollEnd => {
            state.move_selection_to_end();
            reached_scroll_end(state)
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::DebounceElapsed { ticket } => debounce_elapsed(state, *ticket),
        Event::SearchCompleted { tag, outcome } => {
            let _context_guard = tag.trace_context.as_ref().and_then(|ctx| ctx.attach());
            Ok(search_completed(state, tag, outcome))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::debug!("web access granted");
            } else {
                tracing::warn!("web access denied - searches will fail");
            }
            Ok((false, vec![]))
        }
    }
}

/// Echoes the text and arms the debounce timer for it.
///
/// Every change starts a new generation so in-flight responses for the old
/// text are discarded. Empty text cancels the pending debounce instead.
fn set_search_text(state: &mut AppState, text: String) -> (bool, Vec<Action>) {
    if text == state.search.search_text {
        return (false, vec![]);
    }

    let generation = state.next_generation();
    let is_empty = text.is_empty();
    state.apply(Transition::UpdateSearchText(text));
    state.selected_index = 0;

    if is_empty {
        state.debouncer_mut().disarm();
        tracing::debug!(generation, "search cleared");
        return (true, vec![]);
    }

    let ticket = state.debouncer_mut().arm();
    tracing::trace!(generation, ticket, query = %state.search.search_text, "debounce armed");

    (
        true,
        vec![Action::ScheduleDebounce {
            ticket,
            delay: state.settings.debounce,
        }],
    )
}

/// Starts the first-page search if `ticket` is still the live debounce.
fn debounce_elapsed(state: &mut AppState, ticket: u64) -> Result<(bool, Vec<Action>)> {
    if !state.debouncer_mut().fire(ticket) {
        tracing::trace!(ticket, "superseded debounce ignored");
        return Ok((false, vec![]));
    }
    if state.search.search_text.is_empty() {
        return Ok((false, vec![]));
    }

    state.apply(Transition::StartFetching);

    let tag = RequestTag::new(
        state.generation(),
        state.search.search_text.clone(),
        1,
        RequestKind::FirstPage,
    );
    let request = SearchRequest::new(&state.settings.api_base_url, state.settings.per_page, tag)?;

    tracing::debug!(query = %request.query, generation = state.generation(), "starting search");
    Ok((true, vec![Action::Search(request)]))
}

/// Requests the next page when the list is idle and non-empty.
fn reached_scroll_end(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if !state.search.can_fetch_more() {
        tracing::trace!(
            loading = state.search.loading,
            fetching_more = state.search.fetching_more,
            results = state.search.results.len(),
            "scroll end ignored"
        );
        return Ok((true, vec![]));
    }

    state.apply(Transition::FetchingMore);

    let tag = RequestTag::new(
        state.generation(),
        state.search.search_text.clone(),
        state.search.page + 1,
        RequestKind::NextPage,
    );
    let request = SearchRequest::new(&state.settings.api_base_url, state.settings.per_page, tag)?;

    tracing::debug!(query = %request.query, page = request.page, "fetching next page");
    Ok((true, vec![Action::Search(request)]))
}

/// Applies a response if its tag still matches the controller state.
fn search_completed(state: &mut AppState, tag: &RequestTag, outcome: &SearchOutcome) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!(
        "search_completed",
        query = %tag.query,
        page = tag.page,
        generation = tag.generation
    )
    .entered();

    if !state.is_current(tag) {
        tracing::debug!(
            current_generation = state.generation(),
            current_query = %state.search.search_text,
            "stale response discarded"
        );
        return (false, vec![]);
    }

    let transition = match (tag.kind, outcome) {
        (RequestKind::FirstPage, Ok(items)) => {
            tracing::debug!(items = items.len(), "first page loaded");
            Transition::UpdateSearchResult(items.clone())
        }
        (RequestKind::FirstPage, Err(message)) => {
            tracing::debug!(error = %message, "first page failed");
            Transition::FirstPageFailed(message.clone())
        }
        (RequestKind::NextPage, Ok(items)) => {
            tracing::debug!(items = items.len(), "next page appended");
            Transition::AppendSearchResult(items.clone())
        }
        (RequestKind::NextPage, Err(message)) => {
            tracing::debug!(error = %message, "next page failed");
            Transition::NextPageFailed(message.clone())
        }
    };

    if tag.kind == RequestKind::FirstPage {
        state.selected_index = 0;
    }
    state.apply(transition);
    (true, vec![])
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::ClearSearch => "clear_search",
        Event::SetSearchText(_) => "set_search_text",
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::ReachedScrollEnd => "reached_scroll_end",
        Event::CloseFocus => "close_focus",
        Event::DebounceElapsed { .. } => "debounce_elapsed",
        Event::SearchCompleted { .. } => "search_completed",
        Event::PermissionsResult { .. } => "permissions_result",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::SearchSettings;
    use crate::ui::Theme;

    fn app() -> AppState {
        AppState::new(SearchSettings::default(), Theme::default())
    }

    fn only_ticket(actions: &[Action]) -> u64 {
        match actions {
            [Action::ScheduleDebounce { ticket, .. }] => *ticket,
            other => panic!("expected one debounce, got {other:?}"),
        }
    }

    fn only_request(actions: &[Action]) -> SearchRequest {
        match actions {
            [Action::Search(request)] => request.clone(),
            other => panic!("expected one search, got {other:?}"),
        }
    }

    #[test]
    fn typing_echoes_text_and_arms_debounce() {
        let mut state = app();
        let (render, actions) = handle_event(&mut state, &Event::Char('r')).unwrap();
        assert!(render);
        assert_eq!(state.search.search_text, "r");
        assert!(matches!(
            actions.as_slice(),
            [Action::ScheduleDebounce { delay, .. }] if *delay == SearchSettings::default().debounce
        ));
        assert!(!state.search.loading, "nothing starts before the debounce fires");
    }

    #[test]
    fn backspace_on_empty_text_is_noop() {
        let mut state = app();
        let (render, actions) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn clearing_text_cancels_pending_debounce() {
        let mut state = app();
        let (_, actions) = handle_event(&mut state, &Event::SetSearchText("react".into())).unwrap();
        let ticket = only_ticket(&actions);

        let (_, actions) = handle_event(&mut state, &Event::ClearSearch).unwrap();
        assert!(actions.is_empty());

        let (render, actions) = handle_event(&mut state, &Event::DebounceElapsed { ticket }).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(!state.search.loading);
    }

    #[test]
    fn scroll_end_before_any_results_is_noop() {
        let mut state = app();
        let before = state.search.clone();
        let (_, actions) = handle_event(&mut state, &Event::ReachedScrollEnd).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.search, before);
    }

    #[test]
    fn response_for_other_page_is_ignored() {
        let mut state = app();
        let (_, actions) = handle_event(&mut state, &Event::SetSearchText("react".into())).unwrap();
        let ticket = only_ticket(&actions);
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed { ticket }).unwrap();
        let request = only_request(&actions);

        let mut forged = request.tag.clone();
        forged.page = 2;
        forged.kind = RequestKind::NextPage;
        let (render, _) = handle_event(
            &mut state,
            &Event::SearchCompleted {
                tag: forged,
                outcome: Ok(vec![RepositoryItem::new(1, "a/b")]),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.search.loading);
        assert!(state.search.results.is_empty());
    }

    #[test]
    fn duplicate_response_is_applied_once() {
        let mut state = app();
        let (_, actions) = handle_event(&mut state, &Event::SetSearchText("react".into())).unwrap();
        let ticket = only_ticket(&actions);
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed { ticket }).unwrap();
        let request = only_request(&actions);

        let completed = Event::SearchCompleted {
            tag: request.tag,
            outcome: Ok(vec![RepositoryItem::new(1, "facebook/react")]),
        };
        assert!(handle_event(&mut state, &completed).unwrap().0);
        assert!(!handle_event(&mut state, &completed).unwrap().0);
        assert_eq!(state.search.results.len(), 1);
    }

    #[test]
    fn key_down_past_last_row_fetches_next_page() {
        let mut state = app();
        let (_, actions) = handle_event(&mut state, &Event::SetSearchText("react".into())).unwrap();
        let ticket = only_ticket(&actions);
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed { ticket }).unwrap();
        let request = only_request(&actions);
        handle_event(
            &mut state,
            &Event::SearchCompleted {
                tag: request.tag,
                outcome: Ok(vec![RepositoryItem::new(1, "a/one"), RepositoryItem::new(2, "a/two")]),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.selected_index, 1);

        let (_, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
        let next = only_request(&actions);
        assert_eq!(next.page, 2);
        assert!(state.search.fetching_more);
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = app();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}

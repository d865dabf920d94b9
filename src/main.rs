//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the RepoScout library and the Zellij
//! plugin API. Zellij events are translated to library events, the library
//! decides what to do, and the returned actions are executed here.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` for the search API
//! 3. **Subscribe**: Key, Timer, `WebRequestResult`, `PermissionRequestResult`
//! 4. **Update**: Translate events, delegate to `handle_event`, run actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key(Char)` → `Event::Char`, `Key(Backspace)` → `Event::Backspace`
//! - `Key(Esc)` → `Event::ClearSearch`
//! - `Key(Down)`/`Ctrl+n` → `Event::KeyDown`, `Key(Up)`/`Ctrl+p` → `Event::KeyUp`
//! - `Key(End)` → `Event::ReachedScrollEnd`
//! - `Ctrl+c` → `Event::CloseFocus`
//! - `Timer` → `Event::DebounceElapsed { ticket }` (oldest scheduled ticket)
//! - `WebRequestResult` → `Event::SearchCompleted { tag, outcome }`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use reposcout::app::{RequestTag, SearchOutcome, TimerQueue};
use reposcout::github::decode_response;
use reposcout::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the Zellij-specific timer bookkeeping.
struct State {
    /// Core application state from library layer.
    app: reposcout::AppState,

    /// Debounce tickets in the order their timers were scheduled.
    timers: TimerQueue,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: reposcout::initialize(&Config::default()),
            timers: TimerQueue::default(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        reposcout::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_base_url = %config.api_base_url,
            per_page = config.per_page,
            debounce_ms = config.debounce_ms,
            "parsed configuration"
        );
        self.app = reposcout::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(elapsed) => match self.timers.pop() {
                Some(ticket) => {
                    tracing::trace!(elapsed, ticket, "debounce timer elapsed");
                    Event::DebounceElapsed { ticket }
                }
                None => {
                    tracing::debug!(elapsed, "timer without scheduled ticket");
                    return false;
                }
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                true
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        reposcout::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('c') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::End => Event::ReachedScrollEnd,
            BareKey::Esc => Event::ClearSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Maps an HTTP response back to the request that issued it.
    ///
    /// Responses without a readable tag did not come from us and are dropped.
    fn map_web_result_event(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(tag) = RequestTag::from_context(context) else {
            tracing::debug!(status, "web result without request tag ignored");
            return None;
        };

        let outcome: SearchOutcome = decode_response(status, body).map_err(|e| e.to_string());
        tracing::debug!(
            status,
            query = %tag.query,
            page = tag.page,
            ok = outcome.is_ok(),
            "web result received"
        );

        Some(Event::SearchCompleted { tag, outcome })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::ScheduleDebounce { ticket, delay } => {
                self.timers.push(*ticket);
                set_timeout(delay.as_secs_f64());
            }
            Action::Search(request) => {
                let url = request.url();
                tracing::debug!(url = %url, "issuing search request");
                web_request(url, HttpVerb::Get, request.headers(), vec![], request.context());
            }
        }
    }
}

//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime executes them in order. Actions are the only way the controller
//! reaches the outside world: timers, HTTP and pane visibility.
//!
//! # Example
//!
//! ```rust
//! use reposcout::app::Action;
//! use std::time::Duration;
//!
//! let actions = vec![Action::ScheduleDebounce { ticket: 1, delay: Duration::from_millis(500) }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::github::SearchRequest;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Starts a one-shot timer. When it elapses the runtime must deliver
    /// `Event::DebounceElapsed { ticket }`.
    ScheduleDebounce {
        ticket: u64,
        delay: Duration,
    },

    /// Issues a search request. The runtime must deliver exactly one
    /// `Event::SearchCompleted` carrying `request.tag` when it resolves.
    Search(SearchRequest),
}

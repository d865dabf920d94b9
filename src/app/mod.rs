//! Application layer: the search controller.
//!
//! Sits between the plugin runtime (main.rs) and the GitHub/UI layers.
//!
//! ```text
//! User Input / Timers / Responses → Events → handle_event → Transitions → Actions → Side Effects
//!                 ↑                                                          ↓
//!                 └──────────────── timer elapsed / request resolved ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and request orchestration
//! - [`request`]: Staleness tags and debounce tickets
//! - [`state`]: Search state, transition function and view model computation

pub mod actions;
pub mod handler;
pub mod request;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event, SearchOutcome};
pub use request::{Debouncer, RequestKind, RequestTag, TimerQueue};
pub use state::{AppState, SearchSettings, SearchState, Transition};

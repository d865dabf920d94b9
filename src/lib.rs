//! RepoScout: a Zellij plugin for incremental GitHub repository search.
//!
//! RepoScout searches GitHub repositories as you type:
//! - Debounced search so only the settled query reaches the network
//! - Infinite scroll that appends further pages at the end of the list
//! - Stale-response suppression for queries that have since changed
//! - Themed ANSI rendering with match highlighting

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - Key/Timer/WebRequestResult translation           │
//! │  - Timer and HTTP execution                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Search reducer and transitions                   │
//! │  - Debounce, request tags, staleness                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────────────┐           ┌───────────────────────┐
//! │ UI Layer (ui/)        │           │ GitHub Layer (github/)│
//! │ - Rendering           │           │ - Request URLs        │
//! │ - Theming             │           │ - Response decoding   │
//! │ - Components          │           │ - API error messages  │
//! └───────────────────────┘           └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Repository model (domain/repository)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/reposcout.wasm" {
//!         per_page "10"
//!         debounce_ms "500"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use reposcout::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::SetSearchText("react".into()))?;
//! let Action::ScheduleDebounce { ticket, .. } = actions[0] else { unreachable!() };
//!
//! let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed { ticket })?;
//! assert!(matches!(actions[0], Action::Search(_)));
//! assert!(state.search.loading);
//! # Ok::<(), reposcout::RepoScoutError>(())
//! ```

pub mod app;
pub mod domain;
pub mod github;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{RepoScoutError, RepositoryItem, Result};
pub use ui::Theme;

use app::SearchSettings;
use std::collections::BTreeMap;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 100;
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/reposcout.wasm" {
///     api_base_url "https://github.example.com/api/v3"
///     per_page "25"
///     debounce_ms "300"
///     theme "catppuccin-latte"
///     theme_file "~/.config/reposcout/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search API base URL. Default: `https://api.github.com`
    pub api_base_url: String,

    /// Results per page, clamped to `1..=100`. Default: 10
    pub per_page: u32,

    /// Debounce window in milliseconds. Default: 500
    pub debounce_ms: u64,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` maps to the sandbox home.
    pub theme_file: Option<String>,

    /// Tracing level filter. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or unparseable values fall back to their defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use reposcout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("per_page".to_string(), "250".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.per_page, 100);
    /// assert_eq!(config.debounce_ms, 500);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let api_base_url = config
            .get("api_base_url")
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_API_BASE_URL.to_string(), String::from);

        let per_page = config
            .get("per_page")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map_or(DEFAULT_PER_PAGE, |n| n.clamp(1, MAX_PER_PAGE));

        let debounce_ms = config
            .get("debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            api_base_url,
            per_page,
            debounce_ms,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Search settings handed to the controller.
    #[must_use]
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            api_base_url: self.api_base_url.clone(),
            per_page: self.per_page,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}

/// Builds the initial controller state for `config`.
///
/// The theme is resolved from `theme_file`, then `theme`, then the default.
/// A theme that fails to load is logged and replaced by the default.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing reposcout plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.settings(), theme)
}

//! GitHub repository search API binding.
//!
//! The plugin never performs HTTP itself: Zellij's `web_request` host call is
//! the transport. This module owns both ends of that call:
//!
//! - [`request`]: URL, headers and tagged context for one search page
//! - [`response`]: status/body decoding into repository items or an error
//!
//! ```text
//! handler ─ Action::Search(SearchRequest) ─▶ runtime ─▶ web_request
//!    ▲                                                       │
//!    └── Event::SearchCompleted ◀── decode_response ◀── WebRequestResult
//! ```

pub mod request;
pub mod response;

pub use request::SearchRequest;
pub use response::{decode_response, SearchResponse};

//! Request bookkeeping: staleness tags and debounce tickets.
//!
//! The host's HTTP capability is fire-and-forget: a request is issued with an
//! opaque context map and the response later comes back as a separate event
//! carrying the same map. [`RequestTag`] is what we put in that map so a
//! response can be matched against the state that produced it.
//!
//! Debouncing works the same way. The host timer only reports "a timer
//! elapsed", so every scheduled timer gets a ticket from [`Debouncer`], the
//! runtime remembers tickets in [`TimerQueue`] order, and only the most recently
//! armed ticket is allowed to start a search.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Context map key holding the serialized [`RequestTag`].
pub const TAG_CONTEXT_KEY: &str = "reposcout.request";

/// Distinguishes first-page searches from infinite-scroll fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    /// Page 1 of a new query; replaces the result list.
    FirstPage,
    /// A later page; appended to the result list.
    NextPage,
}

/// Tracing context carried across the request boundary.
///
/// Captures the current OpenTelemetry trace and span IDs so the span that
/// handles the response can be linked to the span that issued the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the active tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid (always the case in unit tests).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Re-attaches this context as the remote parent of the current thread.
    ///
    /// The returned guard must be held while the response is processed.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Identifies the query state a request was issued for.
///
/// A response is applied only if its tag still matches the controller: same
/// query generation, same query text, and (for next pages) the page the
/// controller is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTag {
    /// Query generation at issue time; bumped on every search text change.
    pub generation: u64,

    /// Query text the request was issued for.
    pub query: String,

    /// 1-indexed page requested.
    pub page: u32,

    /// Whether the response replaces or extends the result list.
    pub kind: RequestKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

impl RequestTag {
    /// Creates a tag and captures the current trace context.
    #[must_use]
    pub fn new(generation: u64, query: impl Into<String>, page: u32, kind: RequestKind) -> Self {
        Self {
            generation,
            query: query.into(),
            page,
            kind,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Serializes the tag into a host request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match serde_json::to_string(self) {
            Ok(payload) => {
                context.insert(TAG_CONTEXT_KEY.to_string(), payload);
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize request tag");
            }
        }
        context
    }

    /// Recovers a tag from a host response context map.
    ///
    /// Returns `None` when the map carries no tag or the tag is malformed;
    /// such responses were not issued by this controller.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let payload = context.get(TAG_CONTEXT_KEY)?;
        match serde_json::from_str(payload) {
            Ok(tag) => Some(tag),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize request tag");
                None
            }
        }
    }
}

/// Hands out debounce tickets; only the latest armed ticket may fire.
///
/// Re-arming replaces the pending ticket instead of layering a new one, so a
/// burst of keystrokes leaves exactly one live ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Debouncer {
    next_ticket: u64,
    pending: Option<u64>,
}

impl Debouncer {
    /// Arms a new ticket, superseding any pending one.
    pub fn arm(&mut self) -> u64 {
        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        self.next_ticket
    }

    /// Drops the pending ticket without firing it.
    pub fn disarm(&mut self) {
        self.pending = None;
    }

    /// Consumes `ticket` if it is the pending one.
    ///
    /// Returns `true` exactly once for the live ticket and `false` for every
    /// superseded or already-fired ticket.
    pub fn fire(&mut self, ticket: u64) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// The currently armed ticket, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<u64> {
        self.pending
    }
}

/// Maps the host's anonymous timer callbacks back to debounce tickets.
///
/// Every debounce timer uses the same delay, so timers elapse in the order
/// they were scheduled.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    tickets: VecDeque<u64>,
}

impl TimerQueue {
    /// Records a ticket whose timer was just scheduled.
    pub fn push(&mut self, ticket: u64) {
        self.tickets.push_back(ticket);
    }

    /// Returns the ticket for the timer that just elapsed.
    pub fn pop(&mut self) -> Option<u64> {
        self.tickets.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_survives_context_map() {
        let tag = RequestTag::new(3, "tokio runtime", 2, RequestKind::NextPage);
        let context = tag.to_context();
        assert!(context.contains_key(TAG_CONTEXT_KEY));
        assert_eq!(RequestTag::from_context(&context), Some(tag));
    }

    #[test]
    fn foreign_or_malformed_context_has_no_tag() {
        assert_eq!(RequestTag::from_context(&BTreeMap::new()), None);

        let mut context = BTreeMap::new();
        context.insert(TAG_CONTEXT_KEY.to_string(), "{not json".to_string());
        assert_eq!(RequestTag::from_context(&context), None);
    }

    #[test]
    fn no_trace_context_without_otel_layer() {
        assert!(TraceContext::from_current().is_none());
    }

    #[test]
    fn only_latest_ticket_fires() {
        let mut debouncer = Debouncer::default();
        let first = debouncer.arm();
        let second = debouncer.arm();
        let third = debouncer.arm();

        assert!(!debouncer.fire(first));
        assert!(!debouncer.fire(second));
        assert!(debouncer.fire(third));
        assert!(!debouncer.fire(third), "a ticket fires once");
    }

    #[test]
    fn disarm_drops_pending_ticket() {
        let mut debouncer = Debouncer::default();
        let ticket = debouncer.arm();
        debouncer.disarm();
        assert_eq!(debouncer.pending(), None);
        assert!(!debouncer.fire(ticket));
    }

    #[test]
    fn timer_queue_is_fifo() {
        let mut queue = TimerQueue::default();
        queue.push(1);
        queue.push(2);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }
}

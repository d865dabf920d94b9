//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/reposcout/reposcout-otlp.json`, one
//! OTLP JSON document per line. The file rotates at 5 MB keeping three
//! backups. The level comes from the `trace_level` plugin option.
//!
//! Request tags carry the active trace context across the HTTP round-trip
//! (see [`crate::app::request::TraceContext`]), so response handling is
//! parented to the span that issued the search.

mod export;
mod file_writer;
mod init;

pub use init::{init_tracing, TRACE_FILE_NAME};

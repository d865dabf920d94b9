//! Tracing subscriber setup.

use super::export::{self, SCOPE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "reposcout-otlp.json";

/// Installs the global subscriber exporting spans to the trace file.
///
/// The filter comes from `config.trace_level`, defaulting to `info`. If the
/// data directory cannot be created tracing stays disabled; a second call is
/// a no-op.
///
/// ```rust
/// use reposcout::observability::init_tracing;
/// use reposcout::Config;
///
/// init_tracing(&Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SCOPE_NAME,
    )]);
    let provider = export::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME)))
        .try_init();
}

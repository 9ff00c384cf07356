//! Subscriber setup.
//!
//! Wires `tracing` macros through the OpenTelemetry layer to the OTLP/JSON
//! trace file.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::{Path, PathBuf};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "Marquee";
const TRACE_FILE_NAME: &str = "marquee-otlp.json";

/// Installs the global tracing subscriber with file-based OTLP export.
///
/// The pipeline:
/// 1. filters spans by `config.trace_level`
/// 2. hands them to OpenTelemetry
/// 3. encodes each finished span as an OTLP/JSON line
/// 4. appends the line to a size-rotated file
///
/// # Parameters
///
/// * `config` - Plugin configuration; only `trace_level` is read. Unset or
///   unparsable levels fall back to `info`.
///
/// # File Location
///
/// `~/.local/share/zellij/marquee/marquee-otlp.json`, seen from inside the
/// plugin sandbox as `/host/.local/share/zellij/marquee/marquee-otlp.json`.
///
/// # Errors
///
/// Returns [`MarqueeError::Io`](crate::domain::MarqueeError::Io) when the
/// data directory cannot be created. Nothing is installed in that case and
/// the plugin keeps running without traces.
///
/// Only the first successful call installs a subscriber; later calls are
/// no-ops.
///
/// # Example
///
/// ```rust,no_run
/// use marquee::observability::init_tracing;
/// use marquee::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// if let Err(e) = init_tracing(&config) {
///     eprintln!("tracing disabled: {e}");
/// }
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Result<()> {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let trace_file = prepare_trace_file(&crate::infrastructure::paths::get_data_dir())?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(trace_file, RotationPolicy::default(), resource, SERVICE_NAME);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));

    let _ = subscriber.try_init();
    Ok(())
}

/// Creates `data_dir` if needed and returns the trace file path inside it.
fn prepare_trace_file(data_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join(TRACE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarqueeError;

    #[test]
    fn creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("zellij").join("marquee");

        let path = prepare_trace_file(&data_dir).unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(path, data_dir.join("marquee-otlp.json"));
    }

    #[test]
    fn unusable_data_dir_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("marquee");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = prepare_trace_file(&blocker.join("traces"));

        assert!(matches!(result, Err(MarqueeError::Io(_))));
    }
}

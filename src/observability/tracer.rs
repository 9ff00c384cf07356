//! Tracer provider backed by a file span exporter.

use super::file_writer::{RotatingFile, RotationPolicy};
use super::span_formatter::OtlpJsonEncoder;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// File-based OpenTelemetry span exporter.
///
/// Implements `SpanExporter` by encoding each batch as one OTLP/JSON
/// document and appending it to a rotating file.
struct FileSpanExporter {
    /// Trace file with size-based rotation.
    file: RotatingFile,
    /// OTLP/JSON encoder holding resource and scope.
    encoder: OtlpJsonEncoder,
    /// Set by `shutdown`; later exports fail.
    is_shutdown: bool,
}

impl SpanExporter for FileSpanExporter {
    /// Exports a batch of spans as a single line.
    ///
    /// # Parameters
    ///
    /// * `batch` - Finished spans handed over by the span processor
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is flushed to disk
    /// - `Err(TraceError)` if the exporter is shut down or the write fails
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    /// Marks the exporter shut down. The file handle closes on drop.
    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("encoder", &self.encoder)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Creates a tracer provider with file-based export.
///
/// Spans are exported synchronously by the simple span processor, as each
/// one ends.
///
/// # Parameters
///
/// * `file_path` - Trace file to append to
/// * `policy` - Rotation threshold and backup count
/// * `resource` - Resource attributes (`service.name`) stamped on every batch
/// * `scope` - Instrumentation scope name written into each document
///
/// # Returns
///
/// A `TracerProvider` ready to hand to `tracing-opentelemetry`.
pub fn create_tracer_provider(
    file_path: PathBuf,
    policy: RotationPolicy,
    resource: Resource,
    scope: &'static str,
) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(file_path, policy),
        encoder: OtlpJsonEncoder::new(resource.clone(), scope),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

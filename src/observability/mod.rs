//! Trace export to a local OTLP/JSON file.
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → marquee-otlp.json
//! ```
//!
//! The file lives in the plugin data directory
//! (`~/.local/share/zellij/marquee/`), rotates at 10 MB and keeps three
//! backups. The level comes from the `trace_level` option, default `info`.
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: provider and span exporter
//! - [`span_formatter`]: OTLP/JSON encoding
//! - [`file_writer`]: size-rotated trace file

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

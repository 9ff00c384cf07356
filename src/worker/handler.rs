//! Offline search worker.
//!
//! Runs on a Zellij worker thread so simulated latency never blocks the
//! plugin's render loop. Each `Search` request is answered with exactly one
//! `SearchFinished` response echoing the request's generation.

use crate::worker::catalog::Catalog;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker state. The catalog is built on first use.
#[derive(Serialize, Deserialize, Default)]
pub struct MarqueeWorker {
    #[serde(skip)]
    catalog: Option<Catalog>,
}

impl MarqueeWorker {
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog: Some(catalog) }
    }

    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Answers one request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        match message {
            WorkerMessage::Search {
                generation,
                query,
                latency_ms,
                ..
            } => {
                let _span = tracing::debug_span!("worker_search", generation, query_len = query.len()).entered();

                if latency_ms > 0 {
                    std::thread::sleep(Duration::from_millis(latency_ms));
                }

                let outcome = self.catalog.get_or_insert_with(Catalog::default).search(&query);
                match &outcome {
                    Ok(movies) => tracing::debug!(count = movies.len(), "offline search finished"),
                    Err(e) => tracing::debug!(error = %e, "offline search rejected"),
                }

                WorkerResponse::SearchFinished { generation, outcome }
            }
        }
    }
}

fn init_worker_tracing() {
    if let Err(e) = crate::observability::init_tracing(&crate::Config::default()) {
        eprintln!("marquee worker: tracing disabled: {e}");
    }
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for MarqueeWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let request: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(request);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }
}

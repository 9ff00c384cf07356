//! Plugin ↔ worker message protocol.
//!
//! Requests carry the caller's trace context so spans recorded in the worker
//! join the plugin's trace.

use crate::domain::{Movie, SearchError};
use serde::{Deserialize, Serialize};

/// Serialized OpenTelemetry span reference passed across the worker boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// 32-digit hex trace id.
    pub trace_id: String,

    /// 16-digit hex id of the span that sent the message.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the active span, or `None` when it has no valid OTel context.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
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
}

/// Generates constructors that stamp the current trace context onto a message.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` message with the current trace context.")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    search(Search { generation: u64, query: String, latency_ms: u64 }),
}

/// Requests sent from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Search the offline catalog.
    Search {
        /// Generation token echoed back in the response.
        generation: u64,

        query: String,

        /// Simulated latency before answering.
        latency_ms: u64,

        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Search { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A search finished, successfully or not.
    SearchFinished {
        generation: u64,
        outcome: Result<Vec<Movie>, SearchError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_builder_without_span_has_no_context() {
        let message = WorkerMessage::search(3, "heat".into(), 0);
        assert_eq!(
            message,
            WorkerMessage::Search { generation: 3, query: "heat".into(), latency_ms: 0, trace_context: None }
        );
    }

    #[test]
    fn payload_without_trace_context_parses() {
        let payload = r#"{"Search":{"generation":1,"query":"alien","latency_ms":500}}"#;
        let message: WorkerMessage = serde_json::from_str(payload).unwrap();
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn failed_outcome_serializes_category_only() {
        let response = WorkerResponse::SearchFinished {
            generation: 2,
            outcome: Err(SearchError::EmptyQueryRejected),
        };
        let json = serde_json::to_string(&response).unwrap();
        let back: WorkerResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
        assert!(json.contains("EmptyQueryRejected"));
    }
}

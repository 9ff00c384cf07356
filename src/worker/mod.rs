//! Background worker serving the offline search backend.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `catalog`: built-in fixture catalog and fuzzy title search
//! - `handler`: worker implementation

pub mod catalog;
pub mod handler;
pub mod messages;

pub use catalog::Catalog;
pub use handler::MarqueeWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

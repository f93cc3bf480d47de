//! # Observability
//!
//! - **Structured Logging**: pretty or JSON output filtered by `RUST_LOG`
//! - **Request Tracing**: an `x-request-id` span around every request

mod logging;
pub mod middleware;

pub use logging::{init_logging, LogFormat};
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};

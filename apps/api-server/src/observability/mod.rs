//! Observability - request correlation ids.

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware};

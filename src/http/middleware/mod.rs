//! Request middleware.

pub mod headers;
pub mod request_log;

pub use headers::response_headers;
pub use request_log::{request_log, AuthedUser};

//! Request middleware and identity extractors.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{AuthUser, StaffUser, auth_middleware, authenticate_headers, resolve_account};
pub use error_handler::global_error_handler;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};

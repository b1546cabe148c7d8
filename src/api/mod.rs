//! HTTP layer: handlers, middleware, DTOs and OpenAPI documentation.

pub mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

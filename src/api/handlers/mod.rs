//! HTTP request handlers, grouped by resource.

pub mod auth;
pub mod health;
pub mod installers;
pub mod issues;
pub mod revisions;

//! Configuration management
//!
//! Layered TOML files plus `CATALOG_*` environment variable overrides.
//! See [`loader`] for the precedence rules.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, JwtConfig, Settings};

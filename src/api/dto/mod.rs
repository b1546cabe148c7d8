//! Data Transfer Objects for API requests and responses.

mod auth;
mod error;
mod health;
mod installer;
mod issue;
mod pagination;
mod revision;

pub use auth::{LoginRequest, LoginResponse};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use installer::{InstallerResponse, PatchInstallerRequest, PutInstallerRequest};
pub use issue::{
    CreateIssueRequest, CreateReplyRequest, InstallerIssuesResponse, IssueReplyResponse,
    IssueResponse, PatchIssueRequest, PutIssueRequest,
};
pub use pagination::{PagedResponse, PaginationMeta, PaginationParams};
pub use revision::{
    CreateRevisionRequest, GameRevisionsResponse, InstallerWithRevisions, RevisionActionRequest,
    RevisionResponse,
};

use chrono::NaiveDateTime;

/// Timestamps are stored as UTC and rendered with millisecond precision.
pub(crate) fn format_timestamp(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

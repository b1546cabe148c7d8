//! Service layer: business rules between handlers and repositories.

mod installer_service;
mod issue_service;
mod revision_service;
mod user_service;

pub use installer_service::InstallerService;
pub use issue_service::IssueService;
pub use revision_service::{ACCEPT_ACTION, RevisionService};
pub use user_service::{AccountDirectory, UserService};

use crate::repositories::Repositories;

/// Aggregates all services. Cloning is cheap; everything shares one pool.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub installers: InstallerService,
    pub revisions: RevisionService,
    pub issues: IssueService,
}

impl Services {
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users),
            installers: InstallerService::new(
                repos.installers.clone(),
                repos.games.clone(),
                repos.revisions.clone(),
            ),
            revisions: RevisionService::new(repos.revisions, repos.installers.clone()),
            issues: IssueService::new(repos.issues, repos.installers, repos.games),
        }
    }
}

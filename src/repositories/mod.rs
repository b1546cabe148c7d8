//! Repository layer: async diesel queries against the connection pool.

mod game_repo;
mod installer_repo;
mod issue_repo;
mod revision_repo;
mod user_repo;

pub use game_repo::GameRepository;
pub use installer_repo::InstallerRepository;
pub use issue_repo::{IssueRepository, IssueThread};
pub use revision_repo::RevisionRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories. Cloning only clones the pool handle.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub games: GameRepository,
    pub installers: InstallerRepository,
    pub revisions: RevisionRepository,
    pub issues: IssueRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            games: GameRepository::new(pool.clone()),
            installers: InstallerRepository::new(pool.clone()),
            revisions: RevisionRepository::new(pool.clone()),
            issues: IssueRepository::new(pool),
        }
    }
}

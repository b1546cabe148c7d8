mod game;
mod installer;
mod issue;
mod revision;
mod user;

pub use game::Game;
pub use installer::{Installer, UpdateInstaller};
pub use issue::{
    InstallerIssue, InstallerIssueReply, NewInstallerIssue, NewInstallerIssueReply,
    UpdateInstallerIssue,
};
pub use revision::{AcceptRevision, InstallerRevision, NewInstallerRevision};
pub use user::{NewUser, User};

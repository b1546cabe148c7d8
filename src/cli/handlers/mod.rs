//! One handler per subcommand.

pub mod create_user;
pub mod migrate;
pub mod serve;

pub use create_user::{CreateUserArgs, CreateUserCommandHandler};
pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;

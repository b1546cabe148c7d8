//! Database access: async connection pool and embedded migrations.

mod migrations;
mod pool;

pub use migrations::{
    MIGRATIONS, applied_migration_count, pending_migration_names, revert_migrations,
    run_pending_migrations,
};
pub use pool::{AsyncDbPool, establish_async_connection_pool};

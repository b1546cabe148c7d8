//! `create-user`: provision an account, typically the first moderator.

use crate::config::settings::Settings;
use crate::db::establish_async_connection_pool;
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::services::Services;

pub struct CreateUserCommandHandler {
    config: Settings,
}

pub struct CreateUserArgs {
    pub username: String,
    pub email: String,
    pub password: String,
    pub staff: bool,
}

impl CreateUserCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, args: CreateUserArgs) -> AppResult<()> {
        let pool = establish_async_connection_pool(&self.config.database).await?;
        let services = Services::new(Repositories::new(pool));

        let user = services
            .users
            .create_user(args.username, args.email, &args.password, args.staff)
            .await?;

        tracing::info!(user_id = user.id, is_staff = user.is_staff, "User created");
        println!(
            "✓ Created {} '{}' (id {})",
            if user.is_staff { "staff user" } else { "user" },
            user.username,
            user.id
        );
        Ok(())
    }
}

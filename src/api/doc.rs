use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const INSTALLER_TAG: &str = "Installers";
pub const REVISION_TAG: &str = "Revisions";
pub const ISSUE_TAG: &str = "Issues";
pub const AUTH_TAG: &str = "Auth";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Installer Catalog",
        description = "Installers, their proposed revisions and user-reported issues",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = INSTALLER_TAG, description = "Installer listing, editing and game lookups"),
        (name = REVISION_TAG, description = "Revision submission and moderation"),
        (name = ISSUE_TAG, description = "Issue threads and replies"),
        (name = AUTH_TAG, description = "Authentication endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}

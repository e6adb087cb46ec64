use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use rolekeeper_core::ErrorBody;
use rolekeeper_models::{NewUser, Role, User, UserUpdate};

use crate::modules::users::model::{Ack, RolesPayload, UserPayload, UsersPayload};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::get_roles,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::get_users_role,
        crate::modules::users::controller::add_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            User,
            Role,
            NewUser,
            UserUpdate,
            RolesPayload,
            UserPayload,
            UsersPayload,
            Ack,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Roles", description = "Role listing"),
        (name = "Users", description = "User administration")
    ),
    info(
        title = "Rolekeeper API",
        version = "0.1.0",
        description = "User and role administration behind bearer-token authorization.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

/// `GET /api-docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request/response schemas and
//! the bearer-token security scheme. The document is served by Swagger UI in
//! debug builds and printed by the `openapi-dump` binary.

use crate::domain::{
    AuthSession, PasswordChanged, TweetShareView, TweetView, User,
};
use crate::inbound::http::auth::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::tweets::CreateTweetRequest;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Adds the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Access token returned by POST /api/auth/register or /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tweetshare API",
        description = "Register, sign in, post tweets and share them with other users.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::change_password,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::tweets::create_tweet,
        crate::inbound::http::tweets::my_tweets,
        crate::inbound::http::tweets::shared_with_me,
        crate::inbound::http::tweets::get_tweet,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        User,
        TweetView,
        TweetShareView,
        AuthSession,
        PasswordChanged,
        RegisterRequest,
        LoginRequest,
        ChangePasswordRequest,
        CreateTweetRequest,
    )),
    tags(
        (name = "auth", description = "Registration, sign-in and password changes"),
        (name = "users", description = "User directory"),
        (name = "tweets", description = "Posting and reading tweets"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

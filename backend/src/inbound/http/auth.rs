//! Authentication API handlers.
//!
//! ```text
//! POST /api/auth/register {"email":"ada@example.com","password":"secret1","name":"Ada"}
//! POST /api/auth/login {"email":"ada@example.com","password":"secret1"}
//! PUT /api/auth/change-password {"oldPassword":"secret1","newPassword":"secret2"}
//! ```

use actix_web::{HttpResponse, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthSession, LoginCredentials, PasswordChange, PasswordChanged, Registration};

use super::ApiResult;
use super::identity::AuthenticatedUser;
use super::schemas::ErrorSchema;
use super::state::HttpState;
use super::validation::auth_validation_error;

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Request body for `PUT /api/auth/change-password`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Create an account and return a signed-in session.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthSession),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        password,
        name,
    } = payload.into_inner();
    let registration =
        Registration::try_from_parts(&email, &password, &name).map_err(auth_validation_error)?;
    let session = state.auth.register(&registration).await?;
    Ok(HttpResponse::Created().json(session))
}

/// Exchange credentials for an access token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthSession),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthSession>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(auth_validation_error)?;
    let session = state.auth.login(&credentials).await?;
    Ok(web::Json(session))
}

/// Replace the caller's password.
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = PasswordChanged),
        (status = 400, description = "Invalid request or wrong current password", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "changePassword"
)]
#[put("/auth/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<web::Json<PasswordChanged>> {
    let ChangePasswordRequest {
        old_password,
        new_password,
    } = payload.into_inner();
    let change = PasswordChange::try_from_parts(&old_password, &new_password)
        .map_err(auth_validation_error)?;
    let outcome = state.auth.change_password(user.id(), &change).await?;
    Ok(web::Json(outcome))
}

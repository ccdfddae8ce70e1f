//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::application::membership::{
    AuthenticateUser, RegisterUser, RegisterUserResult, TokenResponse,
};
use crate::application::CommandHandler;
use crate::errors::AppResult;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Member email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Member password (minimum 12 characters)
    #[validate(length(min = 12, message = "Password must be at least 12 characters"))]
    #[schema(example = "SecurePass123!", min_length = 12)]
    pub password: String,
    /// Member first name
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "John")]
    pub first_name: String,
    /// Member last name
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Member email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Member password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Member registered successfully", body = RegisterUserResult),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterUserResult>)> {
    let command = RegisterUser::new(
        payload.email,
        payload.password,
        payload.first_name,
        payload.last_name,
    )?;
    let result = state.register_user.handle(command).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let command = AuthenticateUser::new(payload.email, payload.password)?;
    let token = state.authenticate_user.handle(command).await?;

    Ok(Json(token))
}

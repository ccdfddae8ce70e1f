//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::auth_handler;
use crate::application::membership::{RegisterUserResult, TokenResponse};
use crate::domain::UserView;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Membership API",
        version = "0.1.0",
        description = "Member registration and authentication"
    ),
    paths(auth_handler::register, auth_handler::login),
    components(schemas(
        auth_handler::RegisterRequest,
        auth_handler::LoginRequest,
        RegisterUserResult,
        TokenResponse,
        UserView,
    )),
    tags(
        (name = "Authentication", description = "Member registration and login endpoints")
    )
)]
pub struct ApiDoc;

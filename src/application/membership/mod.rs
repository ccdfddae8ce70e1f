//! Membership use cases: commands, queries and their handlers.

pub mod commands;
pub mod handlers;
pub mod queries;

pub use commands::{AuthenticateUser, RegisterUser};
pub use handlers::{
    AuthenticateUserHandler, Claims, GetUserByEmailHandler, RegisterUserHandler,
    RegisterUserResult, TokenResponse,
};
pub use queries::GetUserByEmail;

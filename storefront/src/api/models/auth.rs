//! API request/response models for authentication.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{store::models::users::UserRecord, types::UserId};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Length bounds are configured, so they are checked in the handler
    /// rather than here
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Given name must be between 1 and 100 characters"))]
    pub given_name: String,
    #[validate(length(min = 1, max = 100, message = "Family name must be between 1 and 100 characters"))]
    pub family_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub password: String,
}

/// Returned by both login and registration: the account's public identity
/// plus a freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: UserRecord, token: String) -> Self {
        Self {
            id: user.id,
            email: user.email,
            given_name: user.given_name,
            family_name: user.family_name,
            token,
        }
    }
}

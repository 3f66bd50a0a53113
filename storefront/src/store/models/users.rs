//! Store models for users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{api::models::users::Role, types::UserId};

/// A stored user account. The password hash never leaves the store layer
/// except for verification during login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserCreateRequest {
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    /// Already hashed; the store never sees a plaintext password
    pub password_hash: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdateRequest {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub password_hash: Option<String>,
    pub roles: Option<Vec<Role>>,
}

//! API models for users and the request-scoped principal.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{store::models::users::UserRecord, types::UserId};

/// Role tags embedded in token claims. Admin implies elevated authorization
/// everywhere an ownership check would otherwise apply.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// The authenticated principal for one request.
///
/// Built by the authentication gate from a verified token and the resolved
/// account, carried in the request extensions, and dropped when the request
/// completes. Never persisted and never shared across requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub email: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

impl From<UserRecord> for CurrentUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            roles: user.roles,
        }
    }
}

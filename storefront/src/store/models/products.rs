//! Store models for products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub stock: i64,
    /// Set once at creation from the authenticated principal; never updated
    pub owner_user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductCreateRequest {
    pub name: String,
    pub price: i64,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub stock: i64,
    pub owner_user_id: UserId,
}

/// Full-replace update of the mutable fields. There is deliberately no owner
/// field here: ownership is fixed at creation.
#[derive(Debug, Clone)]
pub struct ProductUpdateRequest {
    pub name: String,
    pub price: i64,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub stock: i64,
}

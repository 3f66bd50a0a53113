//! API request/response models for products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    store::models::products::ProductRecord,
    types::{ProductId, UserId},
};

/// Create payload. There is no owner field: ownership is taken from the
/// authenticated caller, never from the client.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductCreate {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    /// Price in minor currency units
    #[validate(range(min = 0, message = "Price must be greater than or equal to 0"))]
    pub price: i64,
    #[validate(length(min = 2, max = 50, message = "Category must be between 2 and 50 characters"))]
    pub category: String,
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0, message = "Stock must be greater than or equal to 0"))]
    pub stock: i64,
}

/// Update payload. Unknown fields (including any attempted owner value) are
/// discarded during deserialization; ownership cannot change after creation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductUpdate {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "Price must be greater than or equal to 0"))]
    pub price: i64,
    #[validate(length(min = 2, max = 50, message = "Category must be between 2 and 50 characters"))]
    pub category: String,
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0, message = "Stock must be greater than or equal to 0"))]
    pub stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub stock: i64,
    #[schema(value_type = String, format = "uuid")]
    pub owner_user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRecord> for ProductResponse {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            price: record.price,
            category: record.category,
            description: record.description,
            image: record.image,
            stock: record.stock,
            owner_user_id: record.owner_user_id,
            created_at: record.created_at,
        }
    }
}

/// Query parameters for listing products
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListProductsQuery {
    /// Only return products in this category
    pub category: Option<String>,
}

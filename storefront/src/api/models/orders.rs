//! API request/response models for orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    store::models::orders::OrderRecord,
    types::{OrderId, UserId},
};

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Create payload. The owning user is always the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OrderCreate {
    #[validate(range(exclusive_min = 0.0, message = "Total must be greater than 0"))]
    pub total: f64,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OrderUpdate {
    #[validate(range(exclusive_min = 0.0, message = "Total must be greater than 0"))]
    pub total: f64,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: OrderId,
    #[schema(value_type = String, format = "uuid")]
    pub owner_user_id: UserId,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.id,
            owner_user_id: record.owner_user_id,
            total: record.total,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// Query parameters for listing orders
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    /// Only return orders placed by this user
    #[param(value_type = Option<String>)]
    pub user_id: Option<UserId>,
}

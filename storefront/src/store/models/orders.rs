//! Store models for orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::models::orders::OrderStatus,
    types::{OrderId, UserId},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    /// Set once at creation from the authenticated principal; never updated
    pub owner_user_id: UserId,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderCreateRequest {
    pub owner_user_id: UserId,
    pub total: f64,
    pub status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct OrderUpdateRequest {
    pub total: f64,
    pub status: OrderStatus,
}

//! Store for orders.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    store::{
        errors::{Result, StoreError},
        handlers::repository::Repository,
        models::orders::{OrderCreateRequest, OrderRecord, OrderUpdateRequest},
    },
    types::{OrderId, UserId, abbrev_uuid},
};

/// Filter for listing orders
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Restrict to orders placed by this user
    pub owner_user_id: Option<UserId>,
}

#[derive(Clone, Default)]
pub struct Orders {
    rows: Arc<DashMap<OrderId, OrderRecord>>,
}

impl Orders {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Repository for Orders {
    type CreateRequest = OrderCreateRequest;
    type UpdateRequest = OrderUpdateRequest;
    type Response = OrderRecord;
    type Id = OrderId;
    type Filter = OrderFilter;

    #[instrument(skip(self, request), fields(owner = %abbrev_uuid(&request.owner_user_id)), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let order = OrderRecord {
            id: Uuid::new_v4(),
            owner_user_id: request.owner_user_id,
            total: request.total,
            status: request.status,
            created_at: Utc::now(),
        };
        self.rows.insert(order.id, order.clone());
        Ok(order)
    }

    #[instrument(skip(self), fields(order_id = %abbrev_uuid(&id)))]
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    #[instrument(skip(self, filter))]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut orders: Vec<OrderRecord> = self
            .rows
            .iter()
            .filter(|row| match filter.owner_user_id {
                Some(owner) => row.value().owner_user_id == owner,
                None => true,
            })
            .map(|row| row.value().clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    #[instrument(skip(self, request), fields(order_id = %abbrev_uuid(&id)), err)]
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let mut row = self.rows.get_mut(&id).ok_or(StoreError::NotFound)?;

        // id, owner_user_id and created_at are fixed at creation
        row.total = request.total;
        row.status = request.status;

        Ok(row.value().clone())
    }

    #[instrument(skip(self), fields(order_id = %abbrev_uuid(&id)))]
    async fn delete(&self, id: Self::Id) -> Result<bool> {
        Ok(self.rows.remove(&id).is_some())
    }

    async fn exists(&self, id: Self::Id) -> Result<bool> {
        Ok(self.rows.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::orders::OrderStatus;

    fn create_request(owner: UserId) -> OrderCreateRequest {
        OrderCreateRequest {
            owner_user_id: owner,
            total: 149.90,
            status: OrderStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_owner_filter() {
        let orders = Orders::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        orders.create(&create_request(alice)).await.unwrap();
        orders.create(&create_request(alice)).await.unwrap();
        orders.create(&create_request(bob)).await.unwrap();

        let all = orders.list(&OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let alices = orders
            .list(&OrderFilter {
                owner_user_id: Some(alice),
            })
            .await
            .unwrap();
        assert_eq!(alices.len(), 2);
    }

    #[tokio::test]
    async fn test_update_keeps_owner_and_changes_status() {
        let orders = Orders::new();
        let owner = Uuid::new_v4();
        let created = orders.create(&create_request(owner)).await.unwrap();

        let updated = orders
            .update(
                created.id,
                &OrderUpdateRequest {
                    total: 149.90,
                    status: OrderStatus::Completed,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Completed);
        assert_eq!(updated.owner_user_id, owner);
    }
}

//! Store for products.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    store::{
        errors::{Result, StoreError},
        handlers::repository::Repository,
        models::products::{ProductCreateRequest, ProductRecord, ProductUpdateRequest},
    },
    types::{ProductId, abbrev_uuid},
};

/// Filter for listing products
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Restrict to products in this category
    pub category: Option<String>,
}

#[derive(Clone, Default)]
pub struct Products {
    rows: Arc<DashMap<ProductId, ProductRecord>>,
}

impl Products {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Repository for Products {
    type CreateRequest = ProductCreateRequest;
    type UpdateRequest = ProductUpdateRequest;
    type Response = ProductRecord;
    type Id = ProductId;
    type Filter = ProductFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let product = ProductRecord {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            price: request.price,
            category: request.category.clone(),
            description: request.description.clone(),
            image: request.image.clone(),
            stock: request.stock,
            owner_user_id: request.owner_user_id,
            created_at: Utc::now(),
        };
        self.rows.insert(product.id, product.clone());
        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)))]
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    #[instrument(skip(self, filter))]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut products: Vec<ProductRecord> = self
            .rows
            .iter()
            .filter(|row| match &filter.category {
                Some(category) => row.value().category == *category,
                None => true,
            })
            .map(|row| row.value().clone())
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    #[instrument(skip(self, request), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let mut row = self.rows.get_mut(&id).ok_or(StoreError::NotFound)?;

        // id, owner_user_id and created_at are fixed at creation
        row.name = request.name.clone();
        row.price = request.price;
        row.category = request.category.clone();
        row.description = request.description.clone();
        row.image = request.image.clone();
        row.stock = request.stock;

        Ok(row.value().clone())
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)))]
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

    fn create_request(name: &str, category: &str) -> ProductCreateRequest {
        ProductCreateRequest {
            name: name.to_string(),
            price: 59900,
            category: category.to_string(),
            description: Some("A thing".to_string()),
            image: None,
            stock: 10,
            owner_user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_category_filter() {
        let products = Products::new();
        products.create(&create_request("Phone", "Electronics")).await.unwrap();
        products.create(&create_request("Laptop", "Electronics")).await.unwrap();
        products.create(&create_request("Chair", "Furniture")).await.unwrap();

        let all = products.list(&ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let electronics = products
            .list(&ProductFilter {
                category: Some("Electronics".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(electronics.len(), 2);
    }

    #[tokio::test]
    async fn test_update_preserves_owner() {
        let products = Products::new();
        let created = products.create(&create_request("Phone", "Electronics")).await.unwrap();

        let updated = products
            .update(
                created.id,
                &ProductUpdateRequest {
                    name: "Phone X".to_string(),
                    price: 64900,
                    category: "Electronics".to_string(),
                    description: None,
                    image: None,
                    stock: 8,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Phone X");
        assert_eq!(updated.owner_user_id, created.owner_user_id);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let products = Products::new();
        let err = products
            .update(
                Uuid::new_v4(),
                &ProductUpdateRequest {
                    name: "x".to_string(),
                    price: 1,
                    category: "y".to_string(),
                    description: None,
                    image: None,
                    stock: 0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_delete() {
        let products = Products::new();
        let created = products.create(&create_request("Phone", "Electronics")).await.unwrap();

        assert!(products.exists(created.id).await.unwrap());
        assert!(products.delete(created.id).await.unwrap());
        assert!(!products.exists(created.id).await.unwrap());
        assert!(!products.delete(created.id).await.unwrap());
    }
}

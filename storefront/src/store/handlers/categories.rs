//! Store for categories.

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    store::{
        errors::{Result, StoreError},
        handlers::repository::Repository,
        models::categories::{CategoryCreateRequest, CategoryRecord, CategoryUpdateRequest},
    },
    types::{CategoryId, abbrev_uuid},
};

/// Filter for listing categories
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {}

#[derive(Clone, Default)]
pub struct Categories {
    rows: Arc<DashMap<CategoryId, CategoryRecord>>,
    // Name uniqueness index, claimed through the entry API
    name_index: Arc<DashMap<String, CategoryId>>,
}

impl Categories {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Repository for Categories {
    type CreateRequest = CategoryCreateRequest;
    type UpdateRequest = CategoryUpdateRequest;
    type Response = CategoryRecord;
    type Id = CategoryId;
    type Filter = CategoryFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        match self.name_index.entry(request.name.clone()) {
            Entry::Occupied(_) => Err(StoreError::UniqueViolation {
                entity: "categories",
                field: "name",
                value: request.name.clone(),
            }),
            Entry::Vacant(slot) => {
                let category = CategoryRecord {
                    id: Uuid::new_v4(),
                    name: request.name.clone(),
                    description: request.description.clone(),
                    icon: request.icon.clone(),
                    product_count: 0,
                };
                self.rows.insert(category.id, category.clone());
                slot.insert(category.id);
                Ok(category)
            }
        }
    }

    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)))]
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    #[instrument(skip(self, _filter))]
    async fn list(&self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut categories: Vec<CategoryRecord> = self.rows.iter().map(|row| row.value().clone()).collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    #[instrument(skip(self, request), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Renaming has to re-claim the name index before touching the row
        let current = self.rows.get(&id).ok_or(StoreError::NotFound)?.value().clone();

        if current.name != request.name {
            match self.name_index.entry(request.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(StoreError::UniqueViolation {
                        entity: "categories",
                        field: "name",
                        value: request.name.clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.name_index.remove(&current.name);
        }

        let mut row = self.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.name = request.name.clone();
        row.description = request.description.clone();
        row.icon = request.icon.clone();

        Ok(row.value().clone())
    }

    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)))]
    async fn delete(&self, id: Self::Id) -> Result<bool> {
        match self.rows.remove(&id) {
            Some((_, category)) => {
                self.name_index.remove(&category.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists(&self, id: Self::Id) -> Result<bool> {
        Ok(self.rows.contains_key(&id))
    }
}

//! Base repository trait for store operations.

/// Contains the Repository trait.
///
/// A repository is the data access seam for one entity kind. It provides
/// methods for creating, reading, updating, and deleting entities, as well as
/// listing them with simple filters and checking existence.
use crate::store::errors::Result;

/// Base repository trait providing common store operations
///
/// This trait has separate associated types for create requests, update
/// requests, and responses.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest: Sync;

    /// The request type for updating entities
    type UpdateRequest: Sync;

    /// The record type returned by operations
    type Response: Send;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities matching a filter
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Update an entity by ID
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;

    /// Delete an entity by ID, reporting whether it existed
    async fn delete(&self, id: Self::Id) -> Result<bool>;

    /// Check whether an entity exists
    async fn exists(&self, id: Self::Id) -> Result<bool>;
}

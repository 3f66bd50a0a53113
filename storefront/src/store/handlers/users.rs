//! Store for user accounts.

use std::sync::Arc;

use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    store::{
        errors::{Result, StoreError},
        handlers::repository::Repository,
        models::users::{UserCreateRequest, UserRecord, UserUpdateRequest},
    },
    types::{UserId, abbrev_uuid},
};

/// Filter for listing users
#[derive(Debug, Clone, Default)]
pub struct UserFilter {}

#[derive(Clone, Default)]
pub struct Users {
    rows: Arc<DashMap<UserId, UserRecord>>,
    // Email uniqueness index. Claiming an email goes through the entry API,
    // which holds the shard lock for the duration of the check-and-insert.
    email_index: Arc<DashMap<String, UserId>>,
}

impl Users {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a user by email (the token subject and login identifier).
    #[instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let id = match self.email_index.get(email) {
            Some(entry) => *entry.value(),
            None => return Ok(None),
        };
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    /// Check whether an account with this email already exists.
    pub async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.email_index.contains_key(email))
    }
}

#[async_trait::async_trait]
impl Repository for Users {
    type CreateRequest = UserCreateRequest;
    type UpdateRequest = UserUpdateRequest;
    type Response = UserRecord;
    type Id = UserId;
    type Filter = UserFilter;

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        match self.email_index.entry(request.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::UniqueViolation {
                entity: "users",
                field: "email",
                value: request.email.clone(),
            }),
            Entry::Vacant(slot) => {
                let user = UserRecord {
                    id: Uuid::new_v4(),
                    email: request.email.clone(),
                    given_name: request.given_name.clone(),
                    family_name: request.family_name.clone(),
                    password_hash: request.password_hash.clone(),
                    roles: request.roles.clone(),
                    created_at: Utc::now(),
                };
                // Publish the row before the index so readers that win the
                // race see a complete record.
                self.rows.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)))]
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    #[instrument(skip(self, _filter))]
    async fn list(&self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut users: Vec<UserRecord> = self.rows.iter().map(|row| row.value().clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let mut row = self.rows.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(given_name) = &request.given_name {
            row.given_name = given_name.clone();
        }
        if let Some(family_name) = &request.family_name {
            row.family_name = family_name.clone();
        }
        if let Some(password_hash) = &request.password_hash {
            row.password_hash = password_hash.clone();
        }
        if let Some(roles) = &request.roles {
            row.roles = roles.clone();
        }

        Ok(row.value().clone())
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)))]
    async fn delete(&self, id: Self::Id) -> Result<bool> {
        match self.rows.remove(&id) {
            Some((_, user)) => {
                self.email_index.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists(&self, id: Self::Id) -> Result<bool> {
        Ok(self.rows.contains_key(&id))
    }
}

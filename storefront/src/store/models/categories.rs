//! Store models for categories.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// A product category. Categories have no owner; write access is role-gated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub product_count: i64,
}

#[derive(Debug, Clone)]
pub struct CategoryCreateRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryUpdateRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

//! Common type definitions and authorization primitives.
//!
//! This module defines:
//! - Type aliases for entity IDs (UserId, ProductId, etc.)
//! - The [`Operation`] and [`Permission`] types used when reporting
//!   authorization failures
//!
//! # ID Types
//!
//! All entity IDs are UUIDs wrapped in type aliases for better type safety:
//!
//! - [`UserId`]: User account identifier
//! - [`ProductId`]: Product identifier
//! - [`CategoryId`]: Category identifier
//! - [`OrderId`]: Order identifier
//!
//! # Utility Functions
//!
//! - [`abbrev_uuid`]: Abbreviate UUIDs to first 8 chars for logging

use std::fmt;
use uuid::Uuid;

use crate::api::models::users::Role;

// Type aliases for IDs
pub type UserId = Uuid;
pub type ProductId = Uuid;
pub type CategoryId = Uuid;
pub type OrderId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

// Operations that can be performed on resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

// What would have satisfied a failed authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    /// User must hold the given role
    Role(Role),
    /// User must be the owner of the specific resource instance
    Owner,
    /// Logical combinator: any of the contained permissions suffices
    Any(Vec<Permission>),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

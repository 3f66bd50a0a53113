//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Authentication** (`/auth/*`): Registration and login, returning bearer
//!   tokens
//! - **Products** (`/products/*`): Public reads, owner-scoped writes
//! - **Categories** (`/categories/*`): Public reads, admin-only writes
//! - **Orders** (`/orders/*`): Public reads, owner-scoped writes
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is available at `/docs` when the server is running.

pub mod handlers;
pub mod models;

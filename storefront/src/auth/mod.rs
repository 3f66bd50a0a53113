//! Authentication and authorization system.
//!
//! This module implements the security core of the service:
//!
//! - Stateless bearer-token authentication: identity is reconstructed entirely
//!   from a signed token, with no server-side session state
//! - Password hashing and verification with Argon2id
//! - A per-request authentication gate that resolves the caller's identity
//!   before any handler runs
//! - A two-tier authorization policy: a static route rule table plus dynamic
//!   per-resource ownership checks
//!
//! # Authentication flow
//!
//! Clients obtain a token from `POST /auth/login` or `POST /auth/register` and
//! present it on subsequent requests:
//!
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! The [`middleware::authentication_gate_middleware`] runs on every request.
//! It extracts the bearer token, verifies it via [`token::TokenCodec`],
//! resolves the subject against the credential store, and binds a
//! [`crate::api::models::users::CurrentUser`] into the request extensions.
//! A missing or invalid token never fails the request at this stage - the
//! request simply proceeds anonymously, and the authorization layer decides
//! whether that is acceptable for the route.
//!
//! # Authorization
//!
//! [`policy`] holds the ordered route rule table (public / authenticated /
//! role-gated, first match wins) enforced by
//! [`middleware::route_rules_middleware`], and the [`policy::Owned`] trait
//! used by handlers for owner-or-admin checks on mutating operations.
//!
//! # Modules
//!
//! - [`current_user`]: Extractor for getting the authenticated user in handlers
//! - [`middleware`]: The authentication gate and route-rule enforcement
//! - [`password`]: Password hashing and verification using Argon2
//! - [`policy`]: Route rules and ownership checks
//! - [`token`]: Signed token issuance and verification

pub mod current_user;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod token;

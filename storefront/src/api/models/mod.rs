//! API request and response data models.
//!
//! This module contains the data structures used for HTTP request
//! deserialization and response serialization. These models define the public
//! API contract and are deliberately distinct from the store records, so the
//! wire shapes and the stored shapes can evolve independently - and so that
//! fields a client must never set (like resource ownership) simply do not
//! exist on the request types.
//!
//! Request models carry `validator` rules; handlers collect every violation
//! into a single 400 response.

pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

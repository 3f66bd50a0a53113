//! Data access layer.
//!
//! The rest of the service treats persistence as an external collaborator:
//! every entity has a store exposing create/read/update/delete plus a couple
//! of entity-specific lookups, behind the common
//! [`handlers::repository::Repository`] trait. The implementation here is
//! in-process and backed by sharded concurrent maps; uniqueness constraints
//! (user email, category name) are enforced atomically through the map entry
//! API, so concurrent duplicate inserts fail the same way they would against
//! a database unique index.
//!
//! Store calls are async at the boundary even though the in-process
//! implementation never awaits; callers should treat them as blocking
//! collaborator calls.

pub mod errors;
pub mod handlers;
pub mod models;

pub use handlers::Stores;

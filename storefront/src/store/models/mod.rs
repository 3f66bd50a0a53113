//! Store entity records and create/update request types.
//!
//! These are distinct from the API models: the API layer decides what a
//! client may set, the store layer records what is actually kept. The
//! separation is what makes owner immutability enforceable - update requests
//! simply have no owner field.

pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

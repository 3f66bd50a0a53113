//! Per-entity stores implementing the common [`repository::Repository`] trait.

pub mod categories;
pub mod orders;
pub mod products;
pub mod repository;
pub mod users;

pub use categories::{Categories, CategoryFilter};
pub use orders::{OrderFilter, Orders};
pub use products::{ProductFilter, Products};
pub use repository::Repository;
pub use users::{UserFilter, Users};

/// All entity stores, bundled for injection into the application state.
///
/// Cloning is cheap: each store is a handle onto shared maps.
#[derive(Clone, Default)]
pub struct Stores {
    pub users: Users,
    pub products: Products,
    pub categories: Categories,
    pub orders: Orders,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }
}

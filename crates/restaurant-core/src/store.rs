//! # Store Port
//!
//! The contract the domain services need from persistent storage.
//!
//! ## Port and Adapter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Domain services (restaurant-api)                                      │
//! │       │                                                                 │
//! │       │  Arc<dyn RestaurantStore>                                      │
//! │       ▼                                                                 │
//! │  RestaurantStore (this trait)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  restaurant_db::Database (SQLite adapter)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Arithmetic
//! Both stock mutations are single statements evaluated by the store:
//! - `adjust_stock`: `stock = stock + delta`
//! - `try_decrement_stock`: `stock = stock - amount` only while
//!   `stock >= amount`, reporting whether the row changed
//!
//! There is no read-then-write path for stock anywhere behind this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Product, Restaurant};

/// Which entity a store failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Restaurant,
    Product,
}

/// Errors reported by a [`RestaurantStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup missed, or an update/delete touched zero rows.
    #[error("{entity:?} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// The owner-email uniqueness constraint rejected an insert.
    #[error("Email already taken: {0}")]
    EmailTaken(String),

    /// Anything else; not classified further.
    #[error("Store failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a NotFound error for the given entity.
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent storage for restaurants and their products.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    // -------------------------------------------------------------------------
    // Restaurants
    // -------------------------------------------------------------------------

    /// Inserts a new restaurant. `EmailTaken` if the email is registered.
    async fn create_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()>;

    /// Looks a restaurant up by its (normalised) owner email.
    async fn restaurant_by_email(&self, email: &str) -> StoreResult<Restaurant>;

    /// Looks a restaurant up by ID.
    async fn restaurant_by_id(&self, id: &str) -> StoreResult<Restaurant>;

    /// Overwrites name, phone, address and `updated_at` by ID.
    async fn update_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()>;

    /// Lists every restaurant. No pagination.
    async fn list_restaurants(&self) -> StoreResult<Vec<Restaurant>>;

    /// Writes the ban flag and reason in one statement.
    async fn set_ban_status(&self, id: &str, banned: bool, reason: Option<&str>) -> StoreResult<()>;

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Inserts a new product. The owning restaurant is not checked here.
    async fn create_product(&self, product: &Product) -> StoreResult<()>;

    async fn product_by_id(&self, id: &str) -> StoreResult<Product>;

    async fn products_by_restaurant(&self, restaurant_id: &str) -> StoreResult<Vec<Product>>;

    /// Overwrites name, description, price, category and `updated_at` by ID.
    async fn update_product(&self, product: &Product) -> StoreResult<()>;

    /// Hard-deletes a product.
    async fn delete_product(&self, id: &str) -> StoreResult<()>;

    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------

    /// Atomically applies `stock = stock + delta`.
    async fn adjust_stock(&self, id: &str, delta: i64) -> StoreResult<()>;

    /// Atomically applies `stock = stock - amount` if and only if
    /// `stock >= amount`.
    ///
    /// Returns `Ok(true)` when the decrement was applied, `Ok(false)` when
    /// the product exists but holds less than `amount`.
    async fn try_decrement_stock(&self, id: &str, amount: i64) -> StoreResult<bool>;

    async fn stock(&self, id: &str) -> StoreResult<i64>;

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    /// Returns `true` if the store answers a trivial query.
    async fn health_check(&self) -> bool;
}

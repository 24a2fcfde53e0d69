//! # Repository Module
//!
//! SQL for each table lives in exactly one repository.
//!
//! ```text
//! RestaurantStore (trait, restaurant-core)
//!      │  implemented in crate::store
//!      ▼
//! Database ──► RestaurantRepository  (restaurants table, embedded address)
//!          └─► ProductRepository     (products table, atomic stock)
//! ```
//!
//! ## Available Repositories
//!
//! - [`RestaurantRepository`](restaurant::RestaurantRepository) - Accounts, profiles, bans
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD and stock

pub mod product;
pub mod restaurant;

//! # restaurant-core: Domain Rules for the Restaurant Service
//!
//! Everything the service knows about restaurants, products and who may
//! touch them, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Restaurant Service Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              restaurant-api (tonic gRPC server)                 │   │
//! │  │   Auth ─► Accounts │ Restaurants │ Catalog  (domain services)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ restaurant-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌───────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  price  │ │ validation│ │ guard │ │  store  │  │   │
//! │  │   └─────────┘ └─────────┘ └───────────┘ └───────┘ └─────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RestaurantStore (trait)                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 restaurant-db (SQLite via sqlx)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Restaurant, Address, Product and their drafts/updates
//! - [`price`] - Integer-cents price type
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Boundary input checks
//! - [`guard`] - Authenticated caller and ownership check
//! - [`store`] - The store port implemented by the database layer

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod guard;
pub mod price;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorCode, ValidationError};
pub use guard::{authorize, AuthenticatedCaller};
pub use price::Price;
pub use store::{RestaurantStore, StoreError, StoreResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for a stored stock level and for a single adjustment.
///
/// Keeps `stock + delta` far away from `i64` overflow inside the store.
pub const MAX_STOCK_LEVEL: i64 = 1_000_000_000;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum accepted password length (argon2 input bound, not a policy).
pub const MAX_PASSWORD_LEN: usize = 128;

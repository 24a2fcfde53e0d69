//! # Domain Services
//!
//! The business rules of the restaurant service, independent of gRPC.
//!
//! ```text
//! gRPC adapter (services/)
//!      │  AuthenticatedCaller + plain domain inputs
//!      ▼
//! ┌─────────────────┐  ┌────────────────────┐  ┌─────────────────────┐
//! │ AccountService  │  │ RestaurantManager  │  │ CatalogService      │
//! │ signup / login  │  │ profile, bans,     │  │ products and stock  │
//! │                 │  │ listings           │  │                     │
//! └────────┬────────┘  └─────────┬──────────┘  └──────────┬──────────┘
//!          └─────────────────────┼────────────────────────┘
//!                                ▼
//!                     Arc<dyn RestaurantStore>
//! ```
//!
//! Every mutating restaurant/product operation takes the caller explicitly
//! and runs [`restaurant_core::authorize`] before touching the store.
//! Errors are [`restaurant_core::CoreError`]; nothing here retries.

pub mod accounts;
pub mod catalog;
pub mod restaurants;

pub use accounts::{AccountService, AuthOutcome};
pub use catalog::CatalogService;
pub use restaurants::RestaurantManager;

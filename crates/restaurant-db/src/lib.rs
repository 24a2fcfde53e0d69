//! # restaurant-db: Database Layer for the Restaurant Service
//!
//! SQLite storage for restaurants and their products, exposed to the rest
//! of the service through the `RestaurantStore` port.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Restaurant Service Data Flow                        │
//! │                                                                         │
//! │  gRPC handler (DecrementStock)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Domain service (catalog) ── Arc<dyn RestaurantStore>                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  restaurant-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ RestaurantRepo     │  │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │ ProductRepo        │  │ 001_*.sql  │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │           ▲                                                     │   │
//! │  │           └── store.rs: impl RestaurantStore for Database       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (DATABASE_PATH)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Per-table SQL
//! - [`store`] - The `RestaurantStore` implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use restaurant_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("restaurant.db")).await?;
//! let store: Arc<dyn RestaurantStore> = Arc::new(db);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::restaurant::RestaurantRepository;

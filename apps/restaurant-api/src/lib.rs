//! # Restaurant API
//!
//! gRPC server for restaurant accounts, profiles and product catalogs.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Restaurant API Services                           │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────────┐  ┌────────────────────────┐│
//! │  │ RestaurantAuth │  │ RestaurantService  │  │ ProductService         ││
//! │  │                │  │                    │  │                        ││
//! │  │ • Signup       │  │ • EditRestaurant   │  │ • Add/Edit/Delete      ││
//! │  │ • Login        │  │ • GetRestaurantById│  │ • Get/List             ││
//! │  │                │  │ • CheckBanStatus   │  │ • Increment/Decrement  ││
//! │  │                │  │ • ListWithProducts │  │ • GetStock             ││
//! │  │                │  │ • Ban / Unban      │  │ • GetOwningRestaurantId││
//! │  └────────────────┘  └────────────────────┘  └────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐                                                     │
//! │  │ HealthService  │                                                     │
//! │  │ • Check        │                                                     │
//! │  └────────────────┘                                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐│  │
//! │  │  │  SQLite      │  │   argon2     │  │    JWT Auth              ││  │
//! │  │  │  (sqlx pool) │  │  passwords   │  │    owner tokens          ││  │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────────────┘│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (see [`config::ServiceConfig`]):
//! - `GRPC_PORT` - gRPC server port (default: 50052)
//! - `DATABASE_PATH` - SQLite file (default: ./restaurant.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 25)
//! - `JWT_SECRET` - Secret for token signing (required in production)
//! - `JWT_TTL_SECS` - Token lifetime (default: 86400)
//! - `REQUEST_TIMEOUT_SECS` - Per-request deadline (default: 30)
//! - `LOG_LEVEL` - Default log filter (default: info)

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod password;
pub mod proto;
pub mod services;

use std::sync::Arc;

use restaurant_core::RestaurantStore;

pub use config::ServiceConfig;
pub use error::{ApiError, CredentialError};

use crate::auth::JwtManager;
use crate::domain::{AccountService, CatalogService, RestaurantManager};
use crate::password::{HashCost, PasswordHasher};

/// Shared application state.
///
/// Built once at startup; every gRPC service holds an `Arc` to it.
pub struct AppState {
    pub store: Arc<dyn RestaurantStore>,
    pub jwt: JwtManager,
    pub accounts: AccountService,
    pub restaurants: RestaurantManager,
    pub catalog: CatalogService,
}

impl AppState {
    /// Wires the domain components around a store.
    pub fn new(store: Arc<dyn RestaurantStore>, config: &ServiceConfig) -> Result<Self, CredentialError> {
        let hasher = PasswordHasher::new(HashCost::from_config(config))?;
        Ok(Self::with_hasher(store, config, hasher))
    }

    /// Same as [`AppState::new`] with an explicit hasher.
    pub fn with_hasher(
        store: Arc<dyn RestaurantStore>,
        config: &ServiceConfig,
        hasher: PasswordHasher,
    ) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.jwt_ttl_secs);

        AppState {
            accounts: AccountService::new(store.clone(), hasher, jwt.clone()),
            restaurants: RestaurantManager::new(store.clone()),
            catalog: CatalogService::new(store.clone()),
            store,
            jwt,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_state {
    use std::sync::Arc;

    use restaurant_db::{Database, DbConfig};

    use crate::config::ServiceConfig;
    use crate::password::{HashCost, PasswordHasher};
    use crate::AppState;

    pub fn config() -> ServiceConfig {
        ServiceConfig {
            grpc_port: 0,
            database_path: ":memory:".to_string(),
            db_max_connections: 1,
            jwt_secret: "service-test-secret".to_string(),
            jwt_ttl_secs: 3600,
            password_hash_memory_kib: 8,
            password_hash_iterations: 1,
            password_hash_parallelism: 1,
            request_timeout_secs: 30,
            log_level: "debug".to_string(),
            app_env: "test".to_string(),
        }
    }

    pub async fn state() -> Arc<AppState> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Arc::new(AppState::with_hasher(
            Arc::new(db),
            &config(),
            PasswordHasher::new(HashCost::minimal()).unwrap(),
        ))
    }
}

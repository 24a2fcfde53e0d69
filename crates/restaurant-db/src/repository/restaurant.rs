//! # Restaurant Repository
//!
//! Database operations for restaurant accounts.
//!
//! The address value object is flattened into four columns of the
//! `restaurants` row and rebuilt on read.

use chrono::{DateTime, Utc};
use restaurant_core::{Address, Restaurant};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, owner_email, password_hash, name, phone_number,
        is_banned, ban_reason,
        street_name, locality, state, pincode,
        created_at, updated_at
    FROM restaurants
"#;

/// Row shape of the `restaurants` table.
#[derive(Debug, sqlx::FromRow)]
struct RestaurantRow {
    id: String,
    owner_email: String,
    password_hash: String,
    name: String,
    phone_number: String,
    is_banned: bool,
    ban_reason: Option<String>,
    street_name: String,
    locality: String,
    state: String,
    pincode: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Restaurant {
            id: row.id,
            owner_email: row.owner_email,
            password_hash: row.password_hash,
            name: row.name,
            phone_number: row.phone_number,
            is_banned: row.is_banned,
            ban_reason: row.ban_reason,
            address: Address {
                street_name: row.street_name,
                locality: row.locality,
                state: row.state,
                pincode: row.pincode,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for restaurant database operations.
#[derive(Debug, Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

impl RestaurantRepository {
    /// Creates a new RestaurantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RestaurantRepository { pool }
    }

    /// Inserts a new restaurant.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Owner email already registered
    pub async fn insert(&self, restaurant: &Restaurant) -> DbResult<()> {
        debug!(id = %restaurant.id, "Inserting restaurant");

        sqlx::query(
            r#"
            INSERT INTO restaurants (
                id, owner_email, password_hash, name, phone_number,
                is_banned, ban_reason,
                street_name, locality, state, pincode,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&restaurant.id)
        .bind(&restaurant.owner_email)
        .bind(&restaurant.password_hash)
        .bind(&restaurant.name)
        .bind(&restaurant.phone_number)
        .bind(restaurant.is_banned)
        .bind(&restaurant.ban_reason)
        .bind(&restaurant.address.street_name)
        .bind(&restaurant.address.locality)
        .bind(&restaurant.address.state)
        .bind(&restaurant.address.pincode)
        .bind(restaurant.created_at)
        .bind(restaurant.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a restaurant by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Restaurant))` - Found
    /// * `Ok(None)` - Not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Restaurant>> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Restaurant::from))
    }

    /// Gets a restaurant by its (already normalised) owner email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Restaurant>> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "{SELECT_COLUMNS} WHERE owner_email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Restaurant::from))
    }

    /// Lists all restaurants, ordered by name then ID.
    pub async fn list_all(&self) -> DbResult<Vec<Restaurant>> {
        let rows = sqlx::query_as::<_, RestaurantRow>(&format!("{SELECT_COLUMNS} ORDER BY name, id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    /// Overwrites the editable profile columns.
    ///
    /// Email, password hash and ban state are not touched here.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Restaurant doesn't exist
    pub async fn update_profile(&self, restaurant: &Restaurant) -> DbResult<()> {
        debug!(id = %restaurant.id, "Updating restaurant profile");

        let result = sqlx::query(
            r#"
            UPDATE restaurants SET
                name = ?2,
                phone_number = ?3,
                street_name = ?4,
                locality = ?5,
                state = ?6,
                pincode = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&restaurant.id)
        .bind(&restaurant.name)
        .bind(&restaurant.phone_number)
        .bind(&restaurant.address.street_name)
        .bind(&restaurant.address.locality)
        .bind(&restaurant.address.state)
        .bind(&restaurant.address.pincode)
        .bind(restaurant.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Restaurant", &restaurant.id));
        }

        Ok(())
    }

    /// Sets or clears the ban in a single statement.
    ///
    /// ## Ban Lifecycle
    /// ```text
    /// set_ban_status(id, true,  Some("reason")) → is_banned = 1, ban_reason = 'reason'
    /// set_ban_status(id, false, None)           → is_banned = 0, ban_reason = NULL
    /// ```
    /// The table's CHECK constraint rejects any other combination.
    pub async fn set_ban_status(&self, id: &str, banned: bool, reason: Option<&str>) -> DbResult<()> {
        debug!(id = %id, banned = banned, "Setting ban status");

        let result = sqlx::query(
            r#"
            UPDATE restaurants SET
                is_banned = ?2,
                ban_reason = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(banned)
        .bind(reason)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Restaurant", id));
        }

        Ok(())
    }
}

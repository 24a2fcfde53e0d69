//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - CRUD operations (delete is a hard delete)
//! - Atomic stock adjustments
//!
//! ## Stock Statements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  ❌ WRONG: read, check, then write (two round trips)                   │
//! │     SELECT stock ...           -- 5                                    │
//! │     (another request decrements by 4 here)                             │
//! │     UPDATE ... SET stock = stock - 3   -- now -2                       │
//! │                                                                         │
//! │  ✅ CORRECT: one conditional statement                                 │
//! │     UPDATE products SET stock = stock - 3                              │
//! │     WHERE id = ? AND stock >= 3                                        │
//! │     rows_affected = 1 → applied, 0 → insufficient (or missing)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use restaurant_core::{Price, Product};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, restaurant_id, name, description,
        price_cents, stock, category,
        created_at, updated_at
    FROM products
"#;

/// Row shape of the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    restaurant_id: String,
    name: String,
    description: String,
    price_cents: i64,
    stock: i64,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            restaurant_id: row.restaurant_id,
            name: row.name,
            description: row.description,
            price: Price::from_cents(row.price_cents),
            stock: row.stock,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.get_by_id("uuid-here").await?;
/// let applied = repo.try_decrement_stock("uuid-here", 3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// The owning restaurant is not verified here.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, restaurant_id = %product.restaurant_id, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, restaurant_id, name, description,
                price_cents, stock, category,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.restaurant_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.stock)
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Lists a restaurant's products, ordered by name.
    ///
    /// An unknown restaurant yields an empty list.
    pub async fn list_by_restaurant(&self, restaurant_id: &str) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_COLUMNS} WHERE restaurant_id = ?1 ORDER BY name, id"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(restaurant_id = %restaurant_id, count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists every product, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} ORDER BY name, id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Overwrites the editable catalog columns.
    ///
    /// `stock` and `restaurant_id` are deliberately absent: stock only moves
    /// through the atomic statements below.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                category = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(&product.category)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Hard-deletes a product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Zero rows affected
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Applies `stock = stock + delta` in one statement.
    ///
    /// Concurrent increments never lose updates. A negative delta that would
    /// cross zero is refused by the CHECK constraint, but callers should use
    /// [`try_decrement_stock`](Self::try_decrement_stock) for decrements.
    pub async fn update_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Updating stock");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET
                stock = stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Decrements stock by `amount` only if at least `amount` is on hand.
    ///
    /// ## Returns
    /// * `Ok(true)` - Applied
    /// * `Ok(false)` - Product exists, stock was insufficient, nothing written
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn try_decrement_stock(&self, id: &str, amount: i64) -> DbResult<bool> {
        debug!(id = %id, amount = %amount, "Conditionally decrementing stock");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET
                stock = stock - ?2,
                updated_at = ?3
            WHERE id = ?1 AND stock >= ?2
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        // Nothing changed: tell a missing product apart from a short one
        if self.exists(id).await? {
            Ok(false)
        } else {
            Err(DbError::not_found("Product", id))
        }
    }

    /// Returns current stock.
    pub async fn get_stock(&self, id: &str) -> DbResult<i64> {
        let stock: Option<i64> = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        stock.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Checks whether a product row exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }
}

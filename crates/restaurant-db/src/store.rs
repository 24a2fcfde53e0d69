//! # Store Adapter
//!
//! Implements the [`RestaurantStore`] port over the SQLite repositories.
//!
//! Each method is one repository call. The adapter's only job is turning
//! "no row" into the port's `NotFound` and a duplicate owner email into
//! `EmailTaken`.

use async_trait::async_trait;
use restaurant_core::store::{EntityKind, RestaurantStore, StoreError, StoreResult};
use restaurant_core::{Product, Restaurant};
use tracing::warn;

use crate::error::DbError;
use crate::pool::Database;

#[async_trait]
impl RestaurantStore for Database {
    async fn create_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()> {
        match self.restaurants().insert(restaurant).await {
            Ok(()) => Ok(()),
            Err(DbError::UniqueViolation { field }) if field.contains("owner_email") => {
                Err(StoreError::EmailTaken(restaurant.owner_email.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn restaurant_by_email(&self, email: &str) -> StoreResult<Restaurant> {
        self.restaurants()
            .get_by_email(email)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Restaurant, email))
    }

    async fn restaurant_by_id(&self, id: &str) -> StoreResult<Restaurant> {
        self.restaurants()
            .get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Restaurant, id))
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()> {
        Ok(self.restaurants().update_profile(restaurant).await?)
    }

    async fn list_restaurants(&self) -> StoreResult<Vec<Restaurant>> {
        Ok(self.restaurants().list_all().await?)
    }

    async fn set_ban_status(&self, id: &str, banned: bool, reason: Option<&str>) -> StoreResult<()> {
        Ok(self.restaurants().set_ban_status(id, banned, reason).await?)
    }

    async fn create_product(&self, product: &Product) -> StoreResult<()> {
        Ok(self.products().insert(product).await?)
    }

    async fn product_by_id(&self, id: &str) -> StoreResult<Product> {
        self.products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))
    }

    async fn products_by_restaurant(&self, restaurant_id: &str) -> StoreResult<Vec<Product>> {
        Ok(self.products().list_by_restaurant(restaurant_id).await?)
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        Ok(self.products().update(product).await?)
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        Ok(self.products().delete(id).await?)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products().list_all().await?)
    }

    async fn adjust_stock(&self, id: &str, delta: i64) -> StoreResult<()> {
        Ok(self.products().update_stock(id, delta).await?)
    }

    async fn try_decrement_stock(&self, id: &str, amount: i64) -> StoreResult<bool> {
        Ok(self.products().try_decrement_stock(id, amount).await?)
    }

    async fn stock(&self, id: &str) -> StoreResult<i64> {
        Ok(self.products().get_stock(id).await?)
    }

    async fn health_check(&self) -> bool {
        let healthy = self.is_healthy().await;
        if !healthy {
            warn!("Database health check failed");
        }
        healthy
    }
}

//! Restaurant profile management, lookups and the ban lifecycle.

use std::sync::Arc;

use restaurant_core::validation::{validate_ban_reason, validate_profile_update};
use restaurant_core::{
    authorize, AuthenticatedCaller, BanStatus, CoreError, CoreResult, ProfileUpdate, Restaurant,
    RestaurantStore, RestaurantWithProducts,
};
use tracing::{info, warn};

/// Restaurant management component.
pub struct RestaurantManager {
    store: Arc<dyn RestaurantStore>,
}

impl RestaurantManager {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        RestaurantManager { store }
    }

    /// Overwrites name, phone and address. The caller must be the restaurant.
    pub async fn edit_profile(
        &self,
        caller: &AuthenticatedCaller,
        restaurant_id: &str,
        update: ProfileUpdate,
    ) -> CoreResult<()> {
        if let Err(e) = authorize(caller, restaurant_id) {
            warn!(caller = %caller, restaurant_id = %restaurant_id, "Profile edit rejected");
            return Err(e);
        }
        validate_profile_update(&update)?;

        let mut restaurant = self.store.restaurant_by_id(restaurant_id).await?;
        restaurant.apply_profile(update);
        self.store.update_restaurant(&restaurant).await?;

        info!(restaurant_id = %restaurant_id, "Restaurant profile updated");
        Ok(())
    }

    /// Service-to-service lookup. Not ownership-checked.
    pub async fn get_by_id(&self, restaurant_id: &str) -> CoreResult<Restaurant> {
        Ok(self.store.restaurant_by_id(restaurant_id).await?)
    }

    /// Reports the ban flag and reason.
    ///
    /// An unknown restaurant is reported as not banned rather than as an
    /// error.
    pub async fn check_ban_status(&self, restaurant_id: &str) -> CoreResult<BanStatus> {
        match self.store.restaurant_by_id(restaurant_id).await {
            Ok(restaurant) => Ok(restaurant.ban_status()),
            Err(e) => match CoreError::from(e) {
                CoreError::RestaurantNotFound(_) => Ok(BanStatus {
                    restaurant_found: false,
                    is_banned: false,
                    reason: None,
                    message: "Restaurant not found".to_string(),
                }),
                other => Err(other),
            },
        }
    }

    /// Lists every restaurant with its products.
    ///
    /// A restaurant whose products cannot be fetched is left out of the
    /// result instead of failing the whole listing.
    pub async fn list_with_products(&self) -> CoreResult<Vec<RestaurantWithProducts>> {
        let restaurants = self.store.list_restaurants().await?;
        let mut listing = Vec::with_capacity(restaurants.len());

        for restaurant in restaurants {
            match self.store.products_by_restaurant(&restaurant.id).await {
                Ok(products) => listing.push(RestaurantWithProducts {
                    restaurant,
                    products,
                }),
                Err(e) => {
                    warn!(
                        restaurant_id = %restaurant.id,
                        error = %e,
                        "Skipping restaurant: product fetch failed"
                    );
                }
            }
        }

        Ok(listing)
    }

    /// Bans a restaurant, writing flag and reason together.
    ///
    /// Administrative; not ownership-checked. Only new logins are refused:
    /// tokens issued before the ban stay valid until they expire.
    pub async fn ban(&self, restaurant_id: &str, reason: &str) -> CoreResult<()> {
        validate_ban_reason(reason)?;
        let reason = reason.trim();

        self.store
            .set_ban_status(restaurant_id, true, Some(reason))
            .await?;

        info!(restaurant_id = %restaurant_id, reason = %reason, "Restaurant banned");
        Ok(())
    }

    /// Clears both the ban flag and the reason.
    pub async fn unban(&self, restaurant_id: &str) -> CoreResult<()> {
        self.store.set_ban_status(restaurant_id, false, None).await?;

        info!(restaurant_id = %restaurant_id, "Restaurant unbanned");
        Ok(())
    }
}

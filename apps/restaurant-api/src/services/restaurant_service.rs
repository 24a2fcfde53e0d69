//! Restaurant gRPC service implementation.
//!
//! `GetRestaurantById` and `CheckBanStatus` report a missing restaurant in
//! the response body (`success = false`) instead of as a status error.
//! Every other call reports failures through the status.

use std::sync::Arc;

use restaurant_core::{CoreError, ProfileUpdate};
use tonic::{Request, Response, Status};
use tracing::info;

use crate::auth::authenticate;
use crate::error::to_status;
use crate::proto::{
    restaurant_service_server::RestaurantService, BanRestaurantRequest, BanRestaurantResponse,
    CheckBanStatusRequest, CheckBanStatusResponse, EditRestaurantRequest, EditRestaurantResponse,
    GetRestaurantByIdRequest, GetRestaurantByIdResponse, ListRestaurantsWithProductsRequest,
    ListRestaurantsWithProductsResponse, UnbanRestaurantRequest, UnbanRestaurantResponse,
};
use crate::services::convert::address_or_default;
use crate::AppState;

/// Restaurant service implementation.
pub struct RestaurantServiceImpl {
    state: Arc<AppState>,
}

impl RestaurantServiceImpl {
    /// Create a new restaurant service.
    pub fn new(state: Arc<AppState>) -> Self {
        RestaurantServiceImpl { state }
    }
}

#[tonic::async_trait]
impl RestaurantService for RestaurantServiceImpl {
    /// Overwrite the caller's own profile.
    async fn edit_restaurant(
        &self,
        request: Request<EditRestaurantRequest>,
    ) -> Result<Response<EditRestaurantResponse>, Status> {
        let caller = authenticate(&self.state.jwt, &request)?;
        let req = request.into_inner();

        self.state
            .restaurants
            .edit_profile(
                &caller,
                &req.restaurant_id,
                ProfileUpdate {
                    name: req.name,
                    phone_number: req.phone_number,
                    address: address_or_default(req.address),
                },
            )
            .await
            .map_err(to_status)?;

        Ok(Response::new(EditRestaurantResponse {
            message: "Restaurant updated successfully".to_string(),
        }))
    }

    /// Look up a restaurant (soft failure on miss).
    async fn get_restaurant_by_id(
        &self,
        request: Request<GetRestaurantByIdRequest>,
    ) -> Result<Response<GetRestaurantByIdResponse>, Status> {
        let req = request.into_inner();

        let response = match self.state.restaurants.get_by_id(&req.restaurant_id).await {
            Ok(restaurant) => GetRestaurantByIdResponse {
                success: true,
                message: "Restaurant retrieved successfully".to_string(),
                restaurant: Some(restaurant.into()),
            },
            Err(CoreError::RestaurantNotFound(_)) => GetRestaurantByIdResponse {
                success: false,
                message: "Restaurant not found".to_string(),
                restaurant: None,
            },
            Err(e) => return Err(to_status(e)),
        };

        Ok(Response::new(response))
    }

    /// Report ban flag and reason (soft failure on miss).
    async fn check_ban_status(
        &self,
        request: Request<CheckBanStatusRequest>,
    ) -> Result<Response<CheckBanStatusResponse>, Status> {
        let req = request.into_inner();

        let status = self
            .state
            .restaurants
            .check_ban_status(&req.restaurant_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(CheckBanStatusResponse {
            success: status.restaurant_found,
            is_banned: status.is_banned,
            ban_reason: status.reason.unwrap_or_default(),
            message: status.message,
        }))
    }

    /// List all restaurants with their products.
    async fn list_restaurants_with_products(
        &self,
        _request: Request<ListRestaurantsWithProductsRequest>,
    ) -> Result<Response<ListRestaurantsWithProductsResponse>, Status> {
        let listing = self
            .state
            .restaurants
            .list_with_products()
            .await
            .map_err(to_status)?;

        info!(count = listing.len(), "Listed restaurants with products");

        Ok(Response::new(ListRestaurantsWithProductsResponse {
            restaurants: listing.into_iter().map(Into::into).collect(),
            message: "Restaurants with products retrieved successfully".to_string(),
        }))
    }

    /// Ban a restaurant (admin).
    async fn ban_restaurant(
        &self,
        request: Request<BanRestaurantRequest>,
    ) -> Result<Response<BanRestaurantResponse>, Status> {
        let req = request.into_inner();

        self.state
            .restaurants
            .ban(&req.restaurant_id, &req.reason)
            .await
            .map_err(to_status)?;

        Ok(Response::new(BanRestaurantResponse {
            message: "Restaurant banned successfully".to_string(),
        }))
    }

    /// Lift a ban (admin).
    async fn unban_restaurant(
        &self,
        request: Request<UnbanRestaurantRequest>,
    ) -> Result<Response<UnbanRestaurantResponse>, Status> {
        let req = request.into_inner();

        self.state
            .restaurants
            .unban(&req.restaurant_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(UnbanRestaurantResponse {
            message: "Restaurant unbanned successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::Address;
    use crate::test_state::state;
    use restaurant_core::SignupDetails;
    use tonic::Code;

    async fn signed_up(state: &Arc<AppState>) -> (String, String) {
        let outcome = state
            .accounts
            .signup(SignupDetails {
                owner_email: "owner@spice.example".to_string(),
                password: "tandoori-nights".to_string(),
                restaurant_name: "Spice Route".to_string(),
                phone_number: "9876543210".to_string(),
                address: restaurant_core::Address {
                    street_name: "12 MG Road".to_string(),
                    locality: "Indiranagar".to_string(),
                    state: "Karnataka".to_string(),
                    pincode: "560038".to_string(),
                },
            })
            .await
            .unwrap();
        (outcome.restaurant_id, outcome.token)
    }

    fn with_token<T>(message: T, token: &str) -> Request<T> {
        let mut request = Request::new(message);
        request
            .metadata_mut()
            .insert("authorization", format!("Bearer {token}").parse().unwrap());
        request
    }

    fn edit(restaurant_id: &str) -> EditRestaurantRequest {
        EditRestaurantRequest {
            restaurant_id: restaurant_id.to_string(),
            name: "Spice Route Express".to_string(),
            phone_number: "9876500000".to_string(),
            address: Some(Address {
                street_name: "4 Church Street".to_string(),
                locality: "Ashok Nagar".to_string(),
                state: "Karnataka".to_string(),
                pincode: "560001".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_edit_requires_token() {
        let state = state().await;
        let (id, _) = signed_up(&state).await;
        let service = RestaurantServiceImpl::new(state);

        let status = service
            .edit_restaurant(Request::new(edit(&id)))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);
    }

    #[tokio::test]
    async fn test_edit_other_restaurant_is_permission_denied() {
        let state = state().await;
        let (_, token) = signed_up(&state).await;
        let service = RestaurantServiceImpl::new(state);

        let status = service
            .edit_restaurant(with_token(edit("another-restaurant"), &token))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::PermissionDenied);
    }

    #[tokio::test]
    async fn test_edit_own_restaurant() {
        let state = state().await;
        let (id, token) = signed_up(&state).await;
        let service = RestaurantServiceImpl::new(state);

        let response = service
            .edit_restaurant(with_token(edit(&id), &token))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.message, "Restaurant updated successfully");

        let found = service
            .get_restaurant_by_id(Request::new(GetRestaurantByIdRequest {
                restaurant_id: id,
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(found.success);
        assert_eq!(found.restaurant.unwrap().name, "Spice Route Express");
    }

    #[tokio::test]
    async fn test_soft_failures() {
        let service = RestaurantServiceImpl::new(state().await);

        let lookup = service
            .get_restaurant_by_id(Request::new(GetRestaurantByIdRequest {
                restaurant_id: "missing".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(!lookup.success);
        assert!(lookup.restaurant.is_none());

        let ban = service
            .check_ban_status(Request::new(CheckBanStatusRequest {
                restaurant_id: "missing".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(!ban.success);
        assert!(!ban.is_banned);
        assert_eq!(ban.message, "Restaurant not found");
    }

    #[tokio::test]
    async fn test_ban_and_unban_roundtrip() {
        let state = state().await;
        let (id, _) = signed_up(&state).await;
        let service = RestaurantServiceImpl::new(state);

        service
            .ban_restaurant(Request::new(BanRestaurantRequest {
                restaurant_id: id.clone(),
                reason: "hygiene".to_string(),
            }))
            .await
            .unwrap();

        let status = service
            .check_ban_status(Request::new(CheckBanStatusRequest {
                restaurant_id: id.clone(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(status.success);
        assert!(status.is_banned);
        assert_eq!(status.ban_reason, "hygiene");

        service
            .unban_restaurant(Request::new(UnbanRestaurantRequest {
                restaurant_id: id.clone(),
            }))
            .await
            .unwrap();

        let status = service
            .check_ban_status(Request::new(CheckBanStatusRequest { restaurant_id: id }))
            .await
            .unwrap()
            .into_inner();
        assert!(!status.is_banned);
        assert_eq!(status.ban_reason, "");
    }

    #[tokio::test]
    async fn test_ban_missing_restaurant_is_not_found() {
        let service = RestaurantServiceImpl::new(state().await);

        let status = service
            .ban_restaurant(Request::new(BanRestaurantRequest {
                restaurant_id: "missing".to_string(),
                reason: "fraud".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }
}

//! Authentication gRPC service implementation.
//!
//! Signup and login for restaurant owners. Neither call needs a token.

use std::sync::Arc;

use restaurant_core::SignupDetails;
use tonic::{Request, Response, Status};
use tracing::info;

use crate::error::to_status;
use crate::proto::{
    restaurant_auth_service_server::RestaurantAuthService, LoginRequest, LoginResponse,
    SignupRequest, SignupResponse,
};
use crate::services::convert::address_or_default;
use crate::AppState;

/// Authentication service implementation.
pub struct RestaurantAuthServiceImpl {
    state: Arc<AppState>,
}

impl RestaurantAuthServiceImpl {
    /// Create a new authentication service.
    pub fn new(state: Arc<AppState>) -> Self {
        RestaurantAuthServiceImpl { state }
    }
}

#[tonic::async_trait]
impl RestaurantAuthService for RestaurantAuthServiceImpl {
    /// Register a restaurant and return its ID with a token.
    async fn signup(&self, request: Request<SignupRequest>) -> Result<Response<SignupResponse>, Status> {
        let req = request.into_inner();

        info!(email = %req.owner_email, "Signup request");

        let outcome = self
            .state
            .accounts
            .signup(SignupDetails {
                owner_email: req.owner_email,
                password: req.password,
                restaurant_name: req.restaurant_name,
                phone_number: req.phone_number,
                address: address_or_default(req.address),
            })
            .await
            .map_err(to_status)?;

        Ok(Response::new(SignupResponse {
            restaurant_id: outcome.restaurant_id,
            token: outcome.token,
            message: "Restaurant registered successfully".to_string(),
        }))
    }

    /// Exchange email and password for a token.
    async fn login(&self, request: Request<LoginRequest>) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        let outcome = self
            .state
            .accounts
            .login(&req.owner_email, &req.password)
            .await
            .map_err(to_status)?;

        Ok(Response::new(LoginResponse {
            restaurant_id: outcome.restaurant_id,
            token: outcome.token,
            message: "Login successful".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::Address;
    use crate::test_state::state;
    use tonic::Code;

    fn signup_request(email: &str) -> Request<SignupRequest> {
        Request::new(SignupRequest {
            owner_email: email.to_string(),
            password: "tandoori-nights".to_string(),
            restaurant_name: "Spice Route".to_string(),
            phone_number: "9876543210".to_string(),
            address: Some(Address {
                street_name: "12 MG Road".to_string(),
                locality: "Indiranagar".to_string(),
                state: "Karnataka".to_string(),
                pincode: "560038".to_string(),
            }),
        })
    }

    #[tokio::test]
    async fn test_signup_and_login() {
        let service = RestaurantAuthServiceImpl::new(state().await);

        let signup = service
            .signup(signup_request("owner@spice.example"))
            .await
            .unwrap()
            .into_inner();
        assert!(!signup.token.is_empty());

        let login = service
            .login(Request::new(LoginRequest {
                owner_email: "owner@spice.example".to_string(),
                password: "tandoori-nights".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(login.restaurant_id, signup.restaurant_id);
        assert_eq!(login.message, "Login successful");
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_already_exists() {
        let service = RestaurantAuthServiceImpl::new(state().await);
        service
            .signup(signup_request("owner@spice.example"))
            .await
            .unwrap();

        let status = service
            .signup(signup_request("owner@spice.example"))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::AlreadyExists);
    }

    #[tokio::test]
    async fn test_missing_address_is_invalid_argument() {
        let service = RestaurantAuthServiceImpl::new(state().await);
        let mut request = signup_request("owner@spice.example");
        request.get_mut().address = None;

        let status = service.signup(request).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_bad_login_is_unauthenticated() {
        let service = RestaurantAuthServiceImpl::new(state().await);

        let status = service
            .login(Request::new(LoginRequest {
                owner_email: "nobody@spice.example".to_string(),
                password: "whatever-it-is".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);
    }
}

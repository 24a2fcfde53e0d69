//! Signup and login for restaurant owners.
//!
//! ## Login Decision Order
//! ```text
//! lookup by email ── miss ─────────────► InvalidCredentials
//!      │
//!      ▼
//! verify password ── mismatch ─────────► InvalidCredentials
//!      │
//!      ▼
//! is_banned? ──────── yes ─────────────► RestaurantBanned { reason }
//!      │
//!      ▼
//! issue token
//! ```
//! The first two outcomes are indistinguishable to the caller.

use std::sync::Arc;

use restaurant_core::store::StoreError;
use restaurant_core::validation::{normalize_email, validate_email, validate_signup};
use restaurant_core::{CoreError, CoreResult, Restaurant, RestaurantStore, SignupDetails};
use tracing::{info, warn};

use crate::auth::JwtManager;
use crate::error::CredentialError;
use crate::password::PasswordHasher;

/// Identity and token handed back by signup and login.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub restaurant_id: String,
    pub token: String,
}

/// Signup/login component.
pub struct AccountService {
    store: Arc<dyn RestaurantStore>,
    hasher: PasswordHasher,
    jwt: JwtManager,
}

impl AccountService {
    pub fn new(store: Arc<dyn RestaurantStore>, hasher: PasswordHasher, jwt: JwtManager) -> Self {
        AccountService { store, hasher, jwt }
    }

    /// Registers a new restaurant and returns its ID with a fresh token.
    ///
    /// The email pre-check is a fast path; the store's uniqueness constraint
    /// is what actually rejects a concurrent duplicate, and that failure
    /// surfaces as the same `EmailAlreadyExists`.
    pub async fn signup(&self, mut details: SignupDetails) -> CoreResult<AuthOutcome> {
        details.owner_email = normalize_email(&details.owner_email);
        validate_signup(&details)?;

        match self.store.restaurant_by_email(&details.owner_email).await {
            Ok(_) => {
                warn!(email = %details.owner_email, "Signup rejected: email already registered");
                return Err(CoreError::EmailAlreadyExists(details.owner_email));
            }
            Err(StoreError::NotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.hash_password(details.password.clone()).await?;
        let restaurant = Restaurant::register(&details, password_hash);

        self.store.create_restaurant(&restaurant).await?;

        let token = self.jwt.issue(&restaurant.id, &restaurant.owner_email)?;

        info!(
            restaurant_id = %restaurant.id,
            email = %restaurant.owner_email,
            "Restaurant registered"
        );

        Ok(AuthOutcome {
            restaurant_id: restaurant.id,
            token,
        })
    }

    /// Authenticates an owner by email and password.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<AuthOutcome> {
        let email = normalize_email(email);
        if validate_email(&email).is_err() || password.is_empty() {
            return Err(CoreError::InvalidCredentials);
        }

        let restaurant = match self.store.restaurant_by_email(&email).await {
            Ok(restaurant) => restaurant,
            Err(StoreError::NotFound { .. }) => {
                warn!(email = %email, "Login failed: unknown email");
                return Err(CoreError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let matches = self
            .verify_password(restaurant.password_hash.clone(), password.to_string())
            .await?;
        if !matches {
            warn!(restaurant_id = %restaurant.id, "Login failed: wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        if restaurant.is_banned {
            let reason = restaurant.ban_reason.unwrap_or_default();
            warn!(restaurant_id = %restaurant.id, reason = %reason, "Login refused: restaurant banned");
            return Err(CoreError::RestaurantBanned { reason });
        }

        let token = self.jwt.issue(&restaurant.id, &restaurant.owner_email)?;

        info!(restaurant_id = %restaurant.id, "Login successful");

        Ok(AuthOutcome {
            restaurant_id: restaurant.id,
            token,
        })
    }

    async fn hash_password(&self, password: String) -> CoreResult<String> {
        let hasher = self.hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CoreError::Credential(e.to_string()))??;
        Ok(hash)
    }

    async fn verify_password(&self, hash: String, password: String) -> CoreResult<bool> {
        let hasher = self.hasher.clone();
        let outcome: Result<bool, CredentialError> =
            tokio::task::spawn_blocking(move || hasher.verify(&hash, &password))
                .await
                .map_err(|e| CoreError::Credential(e.to_string()))?;
        Ok(outcome?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{hasher, jwt, signup_details, store};
    use restaurant_core::ErrorCode;

    async fn service() -> (AccountService, Arc<dyn RestaurantStore>) {
        let store = store().await;
        (AccountService::new(store.clone(), hasher(), jwt()), store)
    }

    #[tokio::test]
    async fn test_signup_then_login_returns_same_id() {
        let (accounts, _) = service().await;

        let signed_up = accounts
            .signup(signup_details("owner@spice.example"))
            .await
            .unwrap();
        let logged_in = accounts
            .login("owner@spice.example", "tandoori-nights")
            .await
            .unwrap();

        assert_eq!(signed_up.restaurant_id, logged_in.restaurant_id);

        let claims = jwt().validate(&logged_in.token).unwrap();
        assert_eq!(claims.sub, signed_up.restaurant_id);
        assert_eq!(claims.email, "owner@spice.example");
    }

    #[tokio::test]
    async fn test_email_is_case_insensitive() {
        let (accounts, _) = service().await;
        accounts
            .signup(signup_details("Owner@Spice.Example"))
            .await
            .unwrap();

        assert!(accounts
            .login("  owner@spice.example ", "tandoori-nights")
            .await
            .is_ok());

        let err = accounts
            .signup(signup_details("OWNER@spice.example"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::EmailAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_duplicate_signup_creates_nothing() {
        let (accounts, store) = service().await;
        accounts
            .signup(signup_details("owner@spice.example"))
            .await
            .unwrap();

        let err = accounts
            .signup(signup_details("owner@spice.example"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::EmailAlreadyExists);
        assert_eq!(store.list_restaurants().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_signups_leave_one_record() {
        let (accounts, store) = service().await;
        let accounts = Arc::new(accounts);

        let first = {
            let accounts = Arc::clone(&accounts);
            tokio::spawn(async move { accounts.signup(signup_details("race@spice.example")).await })
        };
        let second = {
            let accounts = Arc::clone(&accounts);
            tokio::spawn(async move { accounts.signup(signup_details("race@spice.example")).await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(CoreError::EmailAlreadyExists(_)))));
        assert_eq!(store.list_restaurants().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let (accounts, _) = service().await;
        accounts
            .signup(signup_details("owner@spice.example"))
            .await
            .unwrap();

        let wrong_password = accounts
            .login("owner@spice.example", "not-the-password")
            .await
            .unwrap_err();
        let unknown_email = accounts
            .login("nobody@spice.example", "tandoori-nights")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.code(), ErrorCode::InvalidCredentials);
        assert_eq!(unknown_email.code(), ErrorCode::InvalidCredentials);
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_banned_login_reports_reason_until_unbanned() {
        let (accounts, store) = service().await;
        let outcome = accounts
            .signup(signup_details("owner@spice.example"))
            .await
            .unwrap();

        store
            .set_ban_status(&outcome.restaurant_id, true, Some("hygiene inspection failed"))
            .await
            .unwrap();

        let err = accounts
            .login("owner@spice.example", "tandoori-nights")
            .await
            .unwrap_err();
        assert!(
            matches!(err, CoreError::RestaurantBanned { ref reason } if reason == "hygiene inspection failed")
        );

        // Wrong password on a banned account is still just bad credentials
        let err = accounts
            .login("owner@spice.example", "guessing")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCredentials);

        store
            .set_ban_status(&outcome.restaurant_id, false, None)
            .await
            .unwrap();
        assert!(accounts
            .login("owner@spice.example", "tandoori-nights")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let (accounts, store) = service().await;

        let mut details = signup_details("owner@spice.example");
        details.password = "short".to_string();

        let err = accounts.signup(details).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(store.list_restaurants().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_password_hash_is_stored_not_plaintext() {
        let (accounts, store) = service().await;
        let outcome = accounts
            .signup(signup_details("owner@spice.example"))
            .await
            .unwrap();

        let restaurant = store.restaurant_by_id(&outcome.restaurant_id).await.unwrap();
        assert!(restaurant.password_hash.starts_with("$argon2id$"));
        assert!(!restaurant.password_hash.contains("tandoori-nights"));
        assert!(!restaurant.is_banned);
    }
}

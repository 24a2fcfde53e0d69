//! JWT authentication module.
//!
//! Issues the owner tokens returned by Signup/Login and turns the bearer
//! token on incoming requests into an [`AuthenticatedCaller`].

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use restaurant_core::AuthenticatedCaller;
use serde::{Deserialize, Serialize};
use tonic::Request;
use uuid::Uuid;

use crate::error::{ApiError, CredentialError};

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (restaurant_id)
    pub sub: String,

    /// Owner email at issue time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT token manager.
///
/// Built once from configuration; the signing key never changes for the
/// life of the process.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        JwtManager {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a signed token for a restaurant owner.
    pub fn issue(&self, restaurant_id: &str, email: &str) -> Result<String, CredentialError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_secs);

        let claims = Claims {
            sub: restaurant_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        self.sign(&claims)
    }

    /// Validate signature and expiry, and decode the claims.
    pub fn validate(&self, token: &str) -> Result<Claims, CredentialError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| CredentialError::InvalidToken(e.to_string()))
    }

    fn sign(&self, claims: &Claims) -> Result<String, CredentialError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authenticate a request from its `authorization` metadata.
pub fn authenticate<T>(jwt: &JwtManager, request: &Request<T>) -> Result<AuthenticatedCaller, ApiError> {
    let auth_header = request
        .metadata()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::AuthFailed("Missing authorization header".to_string()))?;

    let token = extract_bearer_token(auth_header)
        .ok_or_else(|| ApiError::AuthFailed("Invalid authorization header".to_string()))?;

    let claims = jwt
        .validate(token)
        .map_err(|e| ApiError::AuthFailed(e.to_string()))?;

    Ok(AuthenticatedCaller::new(claims.sub))
}

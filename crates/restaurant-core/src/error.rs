//! # Error Types
//!
//! Domain error taxonomy for the restaurant service.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  restaurant-core (this file)                                           │
//! │  ├── CoreError        - Everything a domain operation can fail with    │
//! │  └── ValidationError  - Malformed input (the InvalidArgument category) │
//! │                                                                         │
//! │  restaurant-core::store                                                │
//! │  └── StoreError       - What the store port reports                    │
//! │                                                                         │
//! │  restaurant-db                                                         │
//! │  └── DbError          - sqlx failures, classified                      │
//! │                                                                         │
//! │  Flow: DbError → StoreError → CoreError → tonic::Status → caller       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` has a stable [`ErrorCode`] so the transport can map it
//! to a status without string matching. `Unauthorized` and the not-found
//! variants always land on different codes.

use serde::Serialize;
use thiserror::Error;

use crate::store::{EntityKind, StoreError};

// =============================================================================
// Core Error
// =============================================================================

/// Domain operation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No restaurant with this ID (or email) exists.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// No product with this ID exists.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Unknown email or wrong password. The two cases are deliberately
    /// reported the same way.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signup with an email that is already registered.
    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    /// Credentials verified but the restaurant is banned.
    #[error("Restaurant is banned: {reason}")]
    RestaurantBanned { reason: String },

    /// A decrement would drive stock below zero.
    ///
    /// ## When This Occurs
    /// ```text
    /// DecrementStock(product, 10)
    ///      │
    ///      ▼
    /// UPDATE ... SET stock = stock - 10 WHERE id = ? AND stock >= 10
    ///      │
    ///      ▼ (0 rows, product exists)
    /// InsufficientStock { product_id, requested: 10 }
    /// ```
    #[error("Insufficient stock for product {product_id}: requested {requested}")]
    InsufficientStock { product_id: String, requested: i64 },

    /// Caller does not own the resource it is trying to mutate.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed input rejected at the boundary.
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    /// Password hashing or token signing failed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// Opaque failure from the store.
    #[error("Store error: {0}")]
    Store(String),
}

impl CoreError {
    /// Returns the machine-readable category of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::RestaurantNotFound(_) | CoreError::ProductNotFound(_) => ErrorCode::NotFound,
            CoreError::InvalidCredentials => ErrorCode::InvalidCredentials,
            CoreError::EmailAlreadyExists(_) => ErrorCode::EmailAlreadyExists,
            CoreError::RestaurantBanned { .. } => ErrorCode::RestaurantBanned,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::Unauthorized(_) => ErrorCode::Unauthorized,
            CoreError::Validation(_) => ErrorCode::InvalidArgument,
            CoreError::Credential(_) => ErrorCode::Internal,
            CoreError::Store(_) => ErrorCode::StoreError,
        }
    }

    /// Shorthand for an ownership failure.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        CoreError::Unauthorized(message.into())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound {
                entity: EntityKind::Restaurant,
                id,
            } => CoreError::RestaurantNotFound(id),
            StoreError::NotFound {
                entity: EntityKind::Product,
                id,
            } => CoreError::ProductNotFound(id),
            StoreError::EmailTaken(email) => CoreError::EmailAlreadyExists(email),
            StoreError::Backend(msg) => CoreError::Store(msg),
        }
    }
}

// =============================================================================
// Error Code
// =============================================================================

/// Error categories visible to remote callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    InvalidCredentials,
    EmailAlreadyExists,
    RestaurantBanned,
    InsufficientStock,
    Unauthorized,
    InvalidArgument,
    StoreError,
    Internal,
}

impl ErrorCode {
    /// Stable string form, attached to transport responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            ErrorCode::RestaurantBanned => "RESTAURANT_BANNED",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur before any store interaction.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email, non-numeric phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "p-1".to_string(),
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product p-1: requested 10"
        );

        let err = CoreError::RestaurantBanned {
            reason: "health code violation".to_string(),
        };
        assert_eq!(err.to_string(), "Restaurant is banned: health code violation");
    }

    #[test]
    fn test_unauthorized_and_not_found_never_share_a_code() {
        let unauthorized = CoreError::unauthorized("not your product");
        let missing = CoreError::ProductNotFound("p-1".to_string());

        assert_ne!(unauthorized.code(), missing.code());
        assert_eq!(missing.code(), ErrorCode::NotFound);
        assert_eq!(unauthorized.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn test_store_error_conversion() {
        let err: CoreError = StoreError::not_found(EntityKind::Restaurant, "r-1").into();
        assert!(matches!(err, CoreError::RestaurantNotFound(id) if id == "r-1"));

        let err: CoreError = StoreError::not_found(EntityKind::Product, "p-1").into();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "p-1"));

        let err: CoreError = StoreError::EmailTaken("a@b.com".to_string()).into();
        assert_eq!(err.code(), ErrorCode::EmailAlreadyExists);

        let err: CoreError = StoreError::Backend("disk full".to_string()).into();
        assert_eq!(err.code(), ErrorCode::StoreError);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert_eq!(core_err.code(), ErrorCode::InvalidArgument);
        assert_eq!(core_err.to_string(), "Invalid argument: name is required");
    }

    #[test]
    fn test_error_code_serializes_like_as_str() {
        let json = serde_json::to_string(&ErrorCode::InsufficientStock).unwrap();
        assert_eq!(json, format!("\"{}\"", ErrorCode::InsufficientStock.as_str()));
    }
}

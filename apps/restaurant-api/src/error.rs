//! Error types for the Restaurant API.
//!
//! Domain failures arrive as [`CoreError`] and leave as [`tonic::Status`].
//! The machine-readable category rides along in `x-error-code` metadata so
//! callers can tell, for example, `UNAUTHORIZED` from `RESTAURANT_BANNED`
//! even though both use `PERMISSION_DENIED`.

use restaurant_core::{CoreError, ErrorCode};
use tonic::metadata::MetadataValue;
use tonic::{Code, Status};
use tracing::error;

/// Metadata key carrying the [`ErrorCode`] string.
pub const ERROR_CODE_METADATA_KEY: &str = "x-error-code";

/// Restaurant API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, malformed, or expired bearer token.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// A domain operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Password hashing and token failures.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The hasher itself failed (bad parameters, resource exhaustion).
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// A stored hash could not be parsed.
    #[error("Invalid password hash format: {0}")]
    InvalidHashFormat(String),

    /// Token signing failed.
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Token signature, expiry or shape check failed.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl From<CredentialError> for CoreError {
    fn from(err: CredentialError) -> Self {
        CoreError::Credential(err.to_string())
    }
}

impl From<ApiError> for Status {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::AuthFailed(msg) => Status::unauthenticated(msg),
            ApiError::Core(err) => to_status(err),
        }
    }
}

/// Maps a domain error onto a gRPC status.
///
/// ## Mapping
/// ```text
/// NotFound            → NOT_FOUND
/// InvalidCredentials  → UNAUTHENTICATED
/// EmailAlreadyExists  → ALREADY_EXISTS
/// RestaurantBanned    → PERMISSION_DENIED (message carries the reason)
/// InsufficientStock   → FAILED_PRECONDITION
/// Unauthorized        → PERMISSION_DENIED
/// InvalidArgument     → INVALID_ARGUMENT
/// Store / Credential  → INTERNAL (details logged, not returned)
/// ```
pub fn to_status(err: CoreError) -> Status {
    let code = err.code();

    let grpc_code = match code {
        ErrorCode::NotFound => Code::NotFound,
        ErrorCode::InvalidCredentials => Code::Unauthenticated,
        ErrorCode::EmailAlreadyExists => Code::AlreadyExists,
        ErrorCode::RestaurantBanned => Code::PermissionDenied,
        ErrorCode::InsufficientStock => Code::FailedPrecondition,
        ErrorCode::Unauthorized => Code::PermissionDenied,
        ErrorCode::InvalidArgument => Code::InvalidArgument,
        ErrorCode::StoreError | ErrorCode::Internal => Code::Internal,
    };

    let message = if grpc_code == Code::Internal {
        error!(error = %err, code = code.as_str(), "Request failed");
        "Internal error".to_string()
    } else {
        err.to_string()
    };

    let mut status = Status::new(grpc_code, message);
    status
        .metadata_mut()
        .insert(ERROR_CODE_METADATA_KEY, MetadataValue::from_static(code.as_str()));
    status
}

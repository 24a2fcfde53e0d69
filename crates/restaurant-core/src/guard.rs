//! # Authorization Guard
//!
//! Ownership check applied before every mutating restaurant/product
//! operation.
//!
//! ## Where the Caller Comes From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  gRPC request + "authorization: Bearer <jwt>"                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Transport verifies the token ──► AuthenticatedCaller { restaurant_id } │
//! │       │                                                                 │
//! │       ▼  passed explicitly as a parameter                              │
//! │  Domain operation                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  authorize(&caller, resource_owner_id)                                 │
//! │       ├── ids equal  ──► proceed                                       │
//! │       └── otherwise  ──► CoreError::Unauthorized                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module does no cryptography. It trusts the caller value it is given.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Identity of the restaurant owner making a request.
///
/// Only the transport layer builds one of these, after verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthenticatedCaller {
    restaurant_id: String,
}

impl AuthenticatedCaller {
    /// Wraps an already-verified restaurant ID.
    pub fn new(restaurant_id: impl Into<String>) -> Self {
        AuthenticatedCaller {
            restaurant_id: restaurant_id.into(),
        }
    }

    /// The caller's restaurant ID.
    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    /// Returns `true` if the caller owns the given restaurant ID.
    pub fn owns(&self, resource_owner_id: &str) -> bool {
        self.restaurant_id == resource_owner_id
    }
}

impl fmt::Display for AuthenticatedCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.restaurant_id)
    }
}

/// Fails with `Unauthorized` unless `caller` owns `resource_owner_id`.
pub fn authorize(caller: &AuthenticatedCaller, resource_owner_id: &str) -> CoreResult<()> {
    if caller.owns(resource_owner_id) {
        Ok(())
    } else {
        Err(CoreError::unauthorized(format!(
            "restaurant {} cannot modify resources of restaurant {}",
            caller, resource_owner_id
        )))
    }
}

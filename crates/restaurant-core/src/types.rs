//! # Domain Types
//!
//! Core domain types used throughout the restaurant service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │     Restaurant       │ 1      N │       Product        │            │
//! │  │  ──────────────────  │─────────►│  ──────────────────  │            │
//! │  │  id (UUID)           │          │  id (UUID)           │            │
//! │  │  owner_email (uniq)  │          │  restaurant_id (FK)  │            │
//! │  │  password_hash       │          │  name, description   │            │
//! │  │  is_banned + reason  │          │  price (cents)       │            │
//! │  │  address ──┐         │          │  stock (>= 0)        │            │
//! │  └────────────┼─────────┘          └──────────────────────┘            │
//! │               ▼                                                         │
//! │  ┌──────────────────────┐                                              │
//! │  │  Address (embedded)  │                                              │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ban Invariant
//! `ban_reason` is `Some` exactly when `is_banned` is true. Both are written
//! together by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::price::Price;

// =============================================================================
// Address
// =============================================================================

/// Postal address embedded in a restaurant. Replaced wholesale on edit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street_name: String,
    pub locality: String,
    pub state: String,
    pub pincode: String,
}

// =============================================================================
// Restaurant
// =============================================================================

/// A restaurant account and its public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Unique identifier (UUID v4), immutable.
    pub id: String,

    /// Owner login email, normalised to lower case. Unique.
    pub owner_email: String,

    /// Argon2 PHC string. Never leaves the service.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Display name.
    pub name: String,

    pub phone_number: String,

    pub is_banned: bool,

    /// Present exactly when `is_banned` is true.
    pub ban_reason: Option<String>,

    pub address: Address,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// Builds a fresh, unbanned restaurant record for signup.
    pub fn register(details: &SignupDetails, password_hash: String) -> Self {
        let now = Utc::now();
        Restaurant {
            id: generate_id(),
            owner_email: details.owner_email.clone(),
            password_hash,
            name: details.restaurant_name.clone(),
            phone_number: details.phone_number.clone(),
            is_banned: false,
            ban_reason: None,
            address: details.address.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the editable profile fields.
    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        self.name = update.name;
        self.phone_number = update.phone_number;
        self.address = update.address;
        self.updated_at = Utc::now();
    }

    /// Current ban flag and reason.
    pub fn ban_status(&self) -> BanStatus {
        BanStatus {
            restaurant_found: true,
            is_banned: self.is_banned,
            reason: self.ban_reason.clone(),
            message: if self.is_banned {
                "Restaurant is banned".to_string()
            } else {
                "Restaurant is not banned".to_string()
            },
        }
    }
}

/// Everything a prospective owner submits at signup.
#[derive(Clone)]
pub struct SignupDetails {
    pub owner_email: String,
    pub password: String,
    pub restaurant_name: String,
    pub phone_number: String,
    pub address: Address,
}

impl fmt::Debug for SignupDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupDetails")
            .field("owner_email", &self.owner_email)
            .field("password", &"<redacted>")
            .field("restaurant_name", &self.restaurant_name)
            .field("phone_number", &self.phone_number)
            .field("address", &self.address)
            .finish()
    }
}

/// Mutable restaurant profile fields.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone_number: String,
    pub address: Address,
}

/// Result of a ban status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BanStatus {
    /// `false` when the lookup missed; the other fields are then defaults.
    pub restaurant_found: bool,
    pub is_banned: bool,
    pub reason: Option<String>,
    /// Human-readable explanation, also used for the not-found case.
    pub message: String,
}

/// A restaurant together with its catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantWithProducts {
    pub restaurant: Restaurant,
    pub products: Vec<Product>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item owned by one restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning restaurant. Immutable; decides who may mutate the product.
    pub restaurant_id: String,

    pub name: String,

    pub description: String,

    pub price: Price,

    /// Units on hand. Never negative.
    pub stock: i64,

    pub category: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a fresh product record from a draft.
    pub fn from_draft(draft: NewProduct) -> Self {
        let now = Utc::now();
        Product {
            id: generate_id(),
            restaurant_id: draft.restaurant_id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.initial_stock,
            category: draft.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the editable catalog fields. Stock is untouched.
    pub fn apply_update(&mut self, update: ProductUpdate) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.category = update.category;
        self.updated_at = Utc::now();
    }
}

/// Input for adding a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub initial_stock: i64,
    pub category: String,
}

/// Editable product fields.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Generates a new entity ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

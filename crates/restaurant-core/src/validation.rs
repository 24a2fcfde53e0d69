//! # Validation Module
//!
//! Boundary input checks. Everything here runs before the store is touched
//! and fails with [`ValidationError`], which the service reports as
//! `InvalidArgument`.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Protobuf decoding (types only)                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (shape, ranges, required fields)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite (UNIQUE owner_email, CHECK stock >= 0)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::price::Price;
use crate::types::{Address, NewProduct, ProductUpdate, ProfileUpdate, SignupDetails};
use crate::{MAX_PASSWORD_LEN, MAX_STOCK_LEVEL, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_EMAIL_LEN: usize = 254;
const MAX_TEXT_LEN: usize = 2000;

// =============================================================================
// String Validators
// =============================================================================

/// Trims and lower-cases an email so uniqueness is case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates an owner email.
///
/// ## Rules
/// - Must not be empty, at most 254 characters
/// - Exactly one `@` with a non-empty local part and a dotted domain
///
/// ## Example
/// ```rust
/// use restaurant_core::validation::validate_email;
///
/// assert!(validate_email("owner@spice.example").is_ok());
/// assert!(validate_email("owner").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(required("owner_email"));
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "owner_email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(invalid_format("owner_email", "must contain exactly one '@'")),
    };

    if local.is_empty()
        || domain.len() < 3
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid_format("owner_email", "not a valid email address"));
    }

    Ok(())
}

/// Validates a plaintext password before hashing.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(required("password"));
    }

    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates a display name (restaurant or product).
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates free text that may be empty (descriptions, categories).
pub fn validate_optional_text(field: &str, text: &str) -> ValidationResult<()> {
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - 7 to 15 digits (E.164 bound)
/// - Optional single leading `+`
///
/// ## Example
/// ```rust
/// use restaurant_core::validation::validate_phone_number;
///
/// assert!(validate_phone_number("+919876543210").is_ok());
/// assert!(validate_phone_number("98765-43210").is_err());
/// ```
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(required("phone_number"));
    }

    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid_format("phone_number", "must contain only digits"));
    }

    if !(7..=15).contains(&digits.len()) {
        return Err(ValidationError::OutOfRange {
            field: "phone_number digits".to_string(),
            min: 7,
            max: 15,
        });
    }

    Ok(())
}

/// Validates an address. Every field is required.
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    for (field, value) in [
        ("address.street_name", &address.street_name),
        ("address.locality", &address.locality),
        ("address.state", &address.state),
        ("address.pincode", &address.pincode),
    ] {
        if value.trim().is_empty() {
            return Err(required(field));
        }
        validate_optional_text(field, value)?;
    }

    Ok(())
}

/// Validates a ban reason. A ban always carries one.
pub fn validate_ban_reason(reason: &str) -> ValidationResult<()> {
    if reason.trim().is_empty() {
        return Err(required("reason"));
    }
    validate_optional_text("reason", reason)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price. Zero is allowed.
pub fn validate_price(price: Price) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an initial stock level or a stock adjustment amount.
///
/// ## Rules
/// - Must be non-negative (zero is a no-op adjustment)
/// - Must not exceed [`MAX_STOCK_LEVEL`]
pub fn validate_stock_amount(field: &str, amount: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK_LEVEL).contains(&amount) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_STOCK_LEVEL,
        });
    }

    Ok(())
}

/// Validates an entity ID supplied by a remote caller.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(required(field));
    }

    uuid::Uuid::parse_str(id).map_err(|_| invalid_format(field, "must be a valid UUID"))?;

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

pub fn validate_signup(details: &SignupDetails) -> ValidationResult<()> {
    validate_email(&details.owner_email)?;
    validate_password(&details.password)?;
    validate_name("restaurant_name", &details.restaurant_name)?;
    validate_phone_number(&details.phone_number)?;
    validate_address(&details.address)
}

pub fn validate_profile_update(update: &ProfileUpdate) -> ValidationResult<()> {
    validate_name("restaurant_name", &update.name)?;
    validate_phone_number(&update.phone_number)?;
    validate_address(&update.address)
}

pub fn validate_new_product(draft: &NewProduct) -> ValidationResult<()> {
    validate_id("restaurant_id", &draft.restaurant_id)?;
    validate_name("name", &draft.name)?;
    validate_optional_text("description", &draft.description)?;
    validate_price(draft.price)?;
    validate_stock_amount("stock", draft.initial_stock)?;
    validate_optional_text("category", &draft.category)
}

pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    validate_name("name", &update.name)?;
    validate_optional_text("description", &update.description)?;
    validate_price(update.price)?;
    validate_optional_text("category", &update.category)
}

// =============================================================================
// Helpers
// =============================================================================

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn invalid_format(field: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("owner@spice.example").is_ok());
        assert!(validate_email("  Owner@Spice.Example ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("owner").is_err());
        assert!(validate_email("@spice.example").is_err());
        assert!(validate_email("owner@localhost").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("own er@spice.example").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Owner@Spice.Example "), "owner@spice.example");
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("correct horse").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("9876543210").is_ok());
        assert!(validate_phone_number("+919876543210").is_ok());

        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("12345").is_err());
        assert!(validate_phone_number("phone").is_err());
        assert!(validate_phone_number("++919876543210").is_err());
    }

    #[test]
    fn test_validate_address_requires_every_field() {
        let mut address = Address {
            street_name: "12 MG Road".to_string(),
            locality: "Indiranagar".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560038".to_string(),
        };
        assert!(validate_address(&address).is_ok());

        address.pincode = "  ".to_string();
        let err = validate_address(&address).unwrap_err();
        assert_eq!(err.to_string(), "address.pincode is required");
    }

    #[test]
    fn test_validate_stock_amount() {
        assert!(validate_stock_amount("amount", 0).is_ok());
        assert!(validate_stock_amount("amount", 5).is_ok());
        assert!(validate_stock_amount("amount", MAX_STOCK_LEVEL).is_ok());

        assert!(validate_stock_amount("amount", -1).is_err());
        assert!(validate_stock_amount("amount", MAX_STOCK_LEVEL + 1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Price::zero()).is_ok());
        assert!(validate_price(Price::from_cents(1099)).is_ok());
        assert!(validate_price(Price::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_ban_reason() {
        assert!(validate_ban_reason("repeated hygiene complaints").is_ok());
        assert!(validate_ban_reason("").is_err());
        assert!(validate_ban_reason("   ").is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_id("id", "").is_err());
        assert!(validate_id("id", "not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_new_product_rejects_negative_stock() {
        let draft = NewProduct {
            restaurant_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            name: "Idli".to_string(),
            description: String::new(),
            price: Price::from_cents(4000),
            initial_stock: -3,
            category: "Breakfast".to_string(),
        };

        let err = validate_new_product(&draft).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "stock"));
    }
}

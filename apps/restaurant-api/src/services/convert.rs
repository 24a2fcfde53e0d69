//! Conversions between domain types and generated proto messages.

use restaurant_core::{Address, Product, Restaurant, RestaurantWithProducts};

use crate::proto;

impl From<proto::Address> for Address {
    fn from(address: proto::Address) -> Self {
        Address {
            street_name: address.street_name,
            locality: address.locality,
            state: address.state,
            pincode: address.pincode,
        }
    }
}

impl From<Address> for proto::Address {
    fn from(address: Address) -> Self {
        proto::Address {
            street_name: address.street_name,
            locality: address.locality,
            state: address.state,
            pincode: address.pincode,
        }
    }
}

/// Missing address messages become an empty address, which validation
/// then rejects field by field.
pub fn address_or_default(address: Option<proto::Address>) -> Address {
    address.map(Address::from).unwrap_or_default()
}

impl From<Restaurant> for proto::Restaurant {
    fn from(restaurant: Restaurant) -> Self {
        proto::Restaurant {
            id: restaurant.id,
            owner_email: restaurant.owner_email,
            name: restaurant.name,
            phone_number: restaurant.phone_number,
            is_banned: restaurant.is_banned,
            ban_reason: restaurant.ban_reason.unwrap_or_default(),
            address: Some(restaurant.address.into()),
            created_at: restaurant.created_at.to_rfc3339(),
            updated_at: restaurant.updated_at.to_rfc3339(),
        }
    }
}

impl From<Product> for proto::Product {
    fn from(product: Product) -> Self {
        proto::Product {
            id: product.id,
            restaurant_id: product.restaurant_id,
            name: product.name,
            description: product.description,
            price_cents: product.price.cents(),
            stock: product.stock,
            category: product.category,
            created_at: product.created_at.to_rfc3339(),
            updated_at: product.updated_at.to_rfc3339(),
        }
    }
}

impl From<RestaurantWithProducts> for proto::RestaurantWithProducts {
    fn from(entry: RestaurantWithProducts) -> Self {
        proto::RestaurantWithProducts {
            restaurant: Some(entry.restaurant.into()),
            products: entry.products.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restaurant_core::{NewProduct, Price, SignupDetails};

    #[test]
    fn test_restaurant_to_proto_omits_password_hash() {
        let restaurant = Restaurant::register(
            &SignupDetails {
                owner_email: "owner@spice.example".to_string(),
                password: "secret-password".to_string(),
                restaurant_name: "Spice Route".to_string(),
                phone_number: "9876543210".to_string(),
                address: Address {
                    street_name: "12 MG Road".to_string(),
                    locality: "Indiranagar".to_string(),
                    state: "Karnataka".to_string(),
                    pincode: "560038".to_string(),
                },
            },
            "$argon2id$v=19$stub".to_string(),
        );

        let message = proto::Restaurant::from(restaurant);
        assert_eq!(message.ban_reason, "");
        assert_eq!(message.address.as_ref().unwrap().pincode, "560038");
        assert!(!format!("{message:?}").contains("argon2"));
    }

    #[test]
    fn test_product_price_in_cents() {
        let product = Product::from_draft(NewProduct {
            restaurant_id: "r-1".to_string(),
            name: "Masala Dosa".to_string(),
            description: String::new(),
            price: Price::from_cents(14950),
            initial_stock: 2,
            category: "Mains".to_string(),
        });

        let message = proto::Product::from(product);
        assert_eq!(message.price_cents, 14950);
        assert_eq!(message.stock, 2);
    }

    #[test]
    fn test_missing_address_becomes_empty() {
        assert_eq!(address_or_default(None), Address::default());
    }
}

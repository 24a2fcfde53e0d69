//! gRPC service implementations.
//!
//! Thin adapters: authenticate where required, convert proto messages to
//! domain inputs, call the domain layer, map errors with
//! [`to_status`](crate::error::to_status).

pub mod auth_service;
pub mod convert;
pub mod health_service;
pub mod product_service;
pub mod restaurant_service;

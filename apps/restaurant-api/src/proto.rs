//! Generated gRPC types for `foodbuddy.restaurant.v1`.

#![allow(clippy::all)]

tonic::include_proto!("foodbuddy.restaurant.v1");

//! Product gRPC service implementation.
//!
//! Catalog mutations and stock changes need a bearer token; reads do not.

use std::sync::Arc;

use restaurant_core::{NewProduct, Price, ProductUpdate};
use tonic::{Request, Response, Status};
use tracing::debug;

use crate::auth::authenticate;
use crate::error::to_status;
use crate::proto::{
    product_service_server::ProductService, AddProductRequest, AddProductResponse,
    DecrementStockRequest, DecrementStockResponse, DeleteProductRequest, DeleteProductResponse,
    EditProductRequest, EditProductResponse, GetOwningRestaurantIdRequest,
    GetOwningRestaurantIdResponse, GetProductRequest, GetProductResponse, GetStockRequest,
    GetStockResponse, IncrementStockRequest, IncrementStockResponse, ListProductsRequest,
    ListProductsResponse, ListRestaurantProductsRequest, ListRestaurantProductsResponse,
};
use crate::AppState;

/// Product service implementation.
pub struct ProductServiceImpl {
    state: Arc<AppState>,
}

impl ProductServiceImpl {
    /// Create a new product service.
    pub fn new(state: Arc<AppState>) -> Self {
        ProductServiceImpl { state }
    }
}

#[tonic::async_trait]
impl ProductService for ProductServiceImpl {
    async fn add_product(
        &self,
        request: Request<AddProductRequest>,
    ) -> Result<Response<AddProductResponse>, Status> {
        let caller = authenticate(&self.state.jwt, &request)?;
        let req = request.into_inner();

        let product_id = self
            .state
            .catalog
            .add_product(
                &caller,
                NewProduct {
                    restaurant_id: req.restaurant_id,
                    name: req.name,
                    description: req.description,
                    price: Price::from_cents(req.price_cents),
                    initial_stock: req.initial_stock,
                    category: req.category,
                },
            )
            .await
            .map_err(to_status)?;

        Ok(Response::new(AddProductResponse {
            product_id,
            message: "Product added successfully".to_string(),
        }))
    }

    async fn edit_product(
        &self,
        request: Request<EditProductRequest>,
    ) -> Result<Response<EditProductResponse>, Status> {
        let caller = authenticate(&self.state.jwt, &request)?;
        let req = request.into_inner();

        self.state
            .catalog
            .edit_product(
                &caller,
                &req.product_id,
                ProductUpdate {
                    name: req.name,
                    description: req.description,
                    price: Price::from_cents(req.price_cents),
                    category: req.category,
                },
            )
            .await
            .map_err(to_status)?;

        Ok(Response::new(EditProductResponse {
            message: "Product updated successfully".to_string(),
        }))
    }

    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<DeleteProductResponse>, Status> {
        let caller = authenticate(&self.state.jwt, &request)?;
        let req = request.into_inner();

        self.state
            .catalog
            .delete_product(&caller, &req.product_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(DeleteProductResponse {
            message: "Product deleted successfully".to_string(),
        }))
    }

    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<GetProductResponse>, Status> {
        let req = request.into_inner();

        let product = self
            .state
            .catalog
            .get_product(&req.product_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(GetProductResponse {
            product: Some(product.into()),
            message: "Product retrieved successfully".to_string(),
        }))
    }

    async fn list_restaurant_products(
        &self,
        request: Request<ListRestaurantProductsRequest>,
    ) -> Result<Response<ListRestaurantProductsResponse>, Status> {
        let req = request.into_inner();

        let products = self
            .state
            .catalog
            .list_by_restaurant(&req.restaurant_id)
            .await
            .map_err(to_status)?;

        debug!(restaurant_id = %req.restaurant_id, count = products.len(), "Listed restaurant products");

        Ok(Response::new(ListRestaurantProductsResponse {
            products: products.into_iter().map(Into::into).collect(),
            message: "Products retrieved successfully".to_string(),
        }))
    }

    async fn list_products(
        &self,
        _request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let products = self.state.catalog.list_all().await.map_err(to_status)?;

        Ok(Response::new(ListProductsResponse {
            products: products.into_iter().map(Into::into).collect(),
            message: "Products retrieved successfully".to_string(),
        }))
    }

    async fn increment_stock(
        &self,
        request: Request<IncrementStockRequest>,
    ) -> Result<Response<IncrementStockResponse>, Status> {
        let caller = authenticate(&self.state.jwt, &request)?;
        let req = request.into_inner();

        self.state
            .catalog
            .increment_stock(&caller, &req.product_id, req.amount)
            .await
            .map_err(to_status)?;

        Ok(Response::new(IncrementStockResponse {
            message: "Stock incremented successfully".to_string(),
        }))
    }

    async fn decrement_stock(
        &self,
        request: Request<DecrementStockRequest>,
    ) -> Result<Response<DecrementStockResponse>, Status> {
        let caller = authenticate(&self.state.jwt, &request)?;
        let req = request.into_inner();

        self.state
            .catalog
            .decrement_stock(&caller, &req.product_id, req.amount)
            .await
            .map_err(to_status)?;

        Ok(Response::new(DecrementStockResponse {
            message: "Stock decremented successfully".to_string(),
        }))
    }

    async fn get_stock(
        &self,
        request: Request<GetStockRequest>,
    ) -> Result<Response<GetStockResponse>, Status> {
        let req = request.into_inner();

        let stock = self
            .state
            .catalog
            .get_stock(&req.product_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(GetStockResponse {
            stock,
            message: "Stock retrieved successfully".to_string(),
        }))
    }

    async fn get_owning_restaurant_id(
        &self,
        request: Request<GetOwningRestaurantIdRequest>,
    ) -> Result<Response<GetOwningRestaurantIdResponse>, Status> {
        let req = request.into_inner();

        let restaurant_id = self
            .state
            .catalog
            .owning_restaurant_id(&req.product_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(GetOwningRestaurantIdResponse {
            restaurant_id,
            message: "Restaurant ID retrieved successfully".to_string(),
        }))
    }
}

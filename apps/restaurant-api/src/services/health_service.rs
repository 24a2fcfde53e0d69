//! Health check gRPC service implementation.
//!
//! Provides health checks for monitoring and load balancers.

use std::sync::Arc;

use chrono::Utc;
use tonic::{Request, Response, Status};
use tracing::warn;

use crate::proto::{
    health_check_response::ServingStatus, health_service_server::HealthService,
    HealthCheckRequest, HealthCheckResponse,
};
use crate::AppState;

/// Health service implementation.
pub struct HealthServiceImpl {
    state: Arc<AppState>,
}

impl HealthServiceImpl {
    /// Create a new health service.
    pub fn new(state: Arc<AppState>) -> Self {
        HealthServiceImpl { state }
    }

    /// Check the health of a specific service or overall system.
    async fn check_health(&self, service: &str) -> HealthCheckResponse {
        let (status, message) = match service {
            "" | "overall" | "database" => self.check_database_health().await,
            _ => (ServingStatus::Unknown, format!("Unknown service: {}", service)),
        };

        HealthCheckResponse {
            status: status as i32,
            message,
            server_time: Utc::now().to_rfc3339(),
        }
    }

    /// Check database health.
    async fn check_database_health(&self) -> (ServingStatus, String) {
        if self.state.store.health_check().await {
            (ServingStatus::Serving, "Database connected".to_string())
        } else {
            warn!("Health check: database not answering");
            (ServingStatus::NotServing, "Database unavailable".to_string())
        }
    }
}

#[tonic::async_trait]
impl HealthService for HealthServiceImpl {
    /// Simple health check.
    async fn check(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let req = request.into_inner();
        let response = self.check_health(&req.service).await;
        Ok(Response::new(response))
    }
}

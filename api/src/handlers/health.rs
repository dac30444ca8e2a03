//! Liveness endpoint reporting dependency health

use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use bomato_infra::Infrastructure;
use bomato_shared::types::{HealthResponse, ServiceHealth};

/// Reports the health of each external dependency
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self) -> BTreeMap<String, ServiceHealth>;
}

#[async_trait]
impl HealthProbe for Infrastructure {
    async fn check(&self) -> BTreeMap<String, ServiceHealth> {
        self.health().await
    }
}

/// Probe and process start time, shared by all workers
#[derive(Clone)]
pub struct HealthState {
    probe: Arc<dyn HealthProbe>,
    started_at: Instant,
}

impl HealthState {
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            probe,
            started_at: Instant::now(),
        }
    }
}

/// Handler for GET /health
///
/// 200 with status "OK" when every dependency answers, otherwise 503 with
/// status "DEGRADED" and the failing services' errors.
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let services = state.probe.check().await;
    let report = HealthResponse::new(state.started_at.elapsed().as_secs(), services);

    if report.is_healthy() {
        HttpResponse::Ok().json(report)
    } else {
        tracing::warn!(services = ?report.services, "Health check degraded");
        HttpResponse::ServiceUnavailable().json(report)
    }
}

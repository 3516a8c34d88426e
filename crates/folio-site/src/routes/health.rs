//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Public health check endpoint.
///
/// Returns basic service health for load balancer probes.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "folio-site",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let Json(health) = health_check().await;
        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["service"], "folio-site");
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    }
}

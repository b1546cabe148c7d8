//! Health check DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2025-01-01T12:00:00+00:00",
    "checks": {
        "database": {"status": "healthy", "message": "Connected", "response_time_ms": 3}
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// RFC 3339
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    pub checks: HashMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}

impl HealthResponse {
    /// Unhealthy as soon as any component is.
    pub fn from_checks(version: String, checks: HashMap<String, ComponentHealth>) -> Self {
        let status = if checks
            .values()
            .any(|c| c.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };

        Self {
            status,
            version,
            timestamp: chrono::Utc::now().to_rfc3339(),
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(status: HealthStatus) -> ComponentHealth {
        ComponentHealth {
            status,
            message: None,
            response_time_ms: Some(1),
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&HealthStatus::Healthy).unwrap(), "\"healthy\"");
    }

    #[test]
    fn test_any_unhealthy_component_wins() {
        let mut checks = HashMap::new();
        checks.insert("database".to_string(), component(HealthStatus::Unhealthy));
        checks.insert("migrations".to_string(), component(HealthStatus::Healthy));

        let response = HealthResponse::from_checks("0.1.0".to_string(), checks);
        assert_eq!(response.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn test_no_checks_is_healthy() {
        let response = HealthResponse::from_checks("0.1.0".to_string(), HashMap::new());
        assert_eq!(response.status, HealthStatus::Healthy);
    }
}

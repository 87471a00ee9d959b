//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Simple health check (liveness probe)
///
/// Always returns 200 OK if the process is serving requests.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check (readiness probe)
///
/// Pings the database with `SELECT 1`. Returns 503 Service Unavailable when
/// the ping fails.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let mut dependencies = HashMap::new();

    let database = match sqlx::query("SELECT 1").execute(state.db()).await {
        Ok(_) => DependencyStatus {
            healthy: true,
            message: Some("Connected".to_string()),
        },
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            DependencyStatus {
                healthy: false,
                message: Some("Connection failed".to_string()),
            }
        }
    };
    let ready = database.healthy;
    dependencies.insert("database".to_string(), database);

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = ReadinessResponse {
        ready,
        service: state.config().service.name.clone(),
        dependencies,
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_omits_missing_version() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            service: "rentals-service".to_string(),
            version: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("version").is_none());
        assert_eq!(json["status"], "healthy");
    }

    #[test]
    fn test_readiness_response_serialization() {
        let mut dependencies = HashMap::new();
        dependencies.insert(
            "database".to_string(),
            DependencyStatus {
                healthy: false,
                message: Some("Connection failed".to_string()),
            },
        );
        let response = ReadinessResponse {
            ready: false,
            service: "rentals-service".to_string(),
            dependencies,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ready"], false);
        assert_eq!(json["dependencies"]["database"]["healthy"], false);
    }
}

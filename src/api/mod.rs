use axum::{Router, http::HeaderValue, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::ConnectionManager;
use crate::services::{FacilityService, SeaOrmFacilityService};

mod error;
mod facilities;
mod observability;
mod system;
mod types;

pub use error::ApiError;
pub use observability::LookupOutcome;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub facilities: Arc<dyn FacilityService>,

    pub connections: ConnectionManager,

    pub cors_allowed_origins: Vec<String>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn facilities(&self) -> &Arc<dyn FacilityService> {
        &self.facilities
    }

    #[must_use]
    pub const fn connections(&self) -> &ConnectionManager {
        &self.connections
    }
}

/// Builds the shared state. No connection is opened here; the pool is
/// created by the first request that needs it.
#[must_use]
pub fn create_app_state(
    config: &Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let connections = ConnectionManager::new(config.database.clone());
    let facilities = Arc::new(SeaOrmFacilityService::from_config(
        connections.clone(),
        config,
    ));

    Arc::new(AppState {
        facilities,
        connections,
        cors_allowed_origins: config.server.cors_allowed_origins.clone(),
        prometheus_handle,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.cors_allowed_origins.clone();

    let api_router: Router<Arc<AppState>> = Router::new()
        .route("/facilities", get(facilities::lookup_facilities))
        .route("/facilities/recent", get(facilities::recent_facilities))
        .route("/stations", get(facilities::list_stations))
        .route("/kinds", get(facilities::list_kinds))
        .route("/status/normalize", get(facilities::normalize_status))
        .route("/health/live", get(system::health_live))
        .route("/health/ready", get(system::health_ready))
        .route_layer(middleware::from_fn(observability::track_requests));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

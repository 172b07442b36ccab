//! HTTP API Layer
//!
//! REST API for the therapist scheduling lookup using Axum. All routes live
//! under `/api`:
//!
//! - `GET /api/` and `GET /api/health`: static responses
//! - `GET /api/health/ready`: checks the backing store
//! - `GET /api/insurance-payers`: every payer, sorted by name
//! - `GET /api/availabilities?insurance=<id>`: slots of therapists accepting the payer
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let port = Arc::new(PostgresSchedulingAdapter::new(pool));
//! let app = create_router(port, &config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod telemetry;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use domain_scheduling::{SchedulingPort, SchedulingService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{availability, health, payers};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: SchedulingService,
}

/// Creates the main API router
pub fn create_router(port: Arc<dyn SchedulingPort>, config: &ApiConfig) -> Router {
    let state = AppState {
        service: SchedulingService::new(port),
    };

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/insurance-payers", get(payers::list_payers))
        .route("/availabilities", get(availability::search_availabilities));

    Router::new()
        .route("/api", get(health::root))
        .route("/api/", get(health::root))
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(config))
        .with_state(state)
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

use axum::{Router, middleware, routing::get};

use crate::docs::openapi_json;
use crate::logging::logging_middleware;
use crate::metrics::render_metrics;
use crate::middleware::cors::cors_layer;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_config);

    Router::new()
        .merge(init_users_router())
        .route("/metrics", get(render_metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}

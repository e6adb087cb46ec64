use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use rolekeeper_config::{AccessConfig, CorsConfig, JwtConfig};

use crate::modules::users::service::UserOperations;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The decorated operations stack.
    pub operations: Arc<dyn UserOperations>,
    pub jwt_config: JwtConfig,
    pub access_config: AccessConfig,
    pub cors_config: CorsConfig,
    pub metrics_handle: PrometheusHandle,
}

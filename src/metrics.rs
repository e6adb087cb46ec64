//! Request metrics for the business operations, exported in Prometheus format.
//!
//! The recorder is never installed globally. [`init_metrics`] builds it, hands the
//! recording side to [`RequestMetrics`] (owned by the instrumenting decorator) and
//! returns the [`PrometheusHandle`] that renders `/metrics`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use metrics::{Key, Label, Level, Metadata, Recorder};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::state::AppState;

pub const REQUEST_COUNT: &str = "rolekeeper_request_count";
pub const REQUEST_LATENCY: &str = "rolekeeper_request_latency_seconds";

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Recording side of the operation metrics.
#[derive(Clone)]
pub struct RequestMetrics {
    recorder: Arc<dyn Recorder + Send + Sync>,
}

impl RequestMetrics {
    pub fn new(recorder: Arc<dyn Recorder + Send + Sync>) -> Self {
        Self { recorder }
    }

    /// Counts one call of `method` and records how long it took.
    pub fn record(&self, method: &'static str, failed: bool, elapsed: Duration) {
        let labels = vec![
            Label::new("method", method),
            Label::new("error", if failed { "true" } else { "false" }),
        ];
        let metadata = Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

        self.recorder
            .register_counter(&Key::from_parts(REQUEST_COUNT, labels.clone()), &metadata)
            .increment(1);
        self.recorder
            .register_histogram(&Key::from_parts(REQUEST_LATENCY, labels), &metadata)
            .record(elapsed.as_secs_f64());
    }
}

/// Builds the Prometheus recorder with fixed latency buckets.
pub fn init_metrics() -> Result<(RequestMetrics, PrometheusHandle), BuildError> {
    let recorder = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_LATENCY.to_string()), LATENCY_BUCKETS)?
        .build_recorder();
    let handle = recorder.handle();

    Ok((RequestMetrics::new(Arc::new(recorder)), handle))
}

/// Periodically drains histogram buffers so rendering stays cheap.
pub fn spawn_upkeep(handle: PrometheusHandle) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            handle.run_upkeep();
            debug!("Metrics upkeep completed");
        }
    })
}

/// `GET /metrics`
pub async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

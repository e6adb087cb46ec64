use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rolekeeper_config::{LogFormat, LoggingConfig};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuses the caller's request id when it sent a usable one.
fn request_id(req: &Request) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Runs the request inside an `http_request` span so operation events logged by the
/// users service carry the request id, then logs the outcome by status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request_id(&req);
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        path = %path,
    );

    let mut response = next.run(req).instrument(span.clone()).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    span.in_scope(|| match status {
        500..=599 => error!(status, latency_ms, "Server error"),
        400..=499 => warn!(status, latency_ms, "Client error"),
        _ => info!(status, latency_ms, "Request completed"),
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={level},rolekeeper_auth={level},rolekeeper_db={level},tower_http=warn,sqlx=warn",
            env!("CARGO_CRATE_NAME"),
            level = config.level
        ))
    })
}

/// Installs the global subscriber: stdout in the configured format, plus a daily
/// rolling JSON file when a log directory is set.
///
/// The returned guards flush buffered lines on drop; keep them alive until exit.
pub fn init_tracing(config: &LoggingConfig) -> Vec<WorkerGuard> {
    let mut guards = Vec::new();

    let (stdout, guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(guard);

    let console_layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(stdout)
            .with_current_span(true)
            .with_filter(env_filter(config))
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(stdout)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(config))
            .boxed(),
    };

    let file_layer = config.directory.as_deref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "rolekeeper.json");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(env_filter(config))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guards
}

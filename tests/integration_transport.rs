mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;

use common::{InMemoryUsers, admin_token, request, setup_test_app};

#[tokio::test]
async fn test_options_short_circuits_with_empty_body() {
    let app = setup_test_app(InMemoryUsers::seeded());

    for uri in ["/roles", "/user", "/usersrole", "/user/alice"] {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .header(header::ORIGIN, "http://console.example.test")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap();

        let (status, text) = app.send_text(request).await;
        assert_eq!(status, StatusCode::OK, "OPTIONS {uri}");
        assert!(text.is_empty());
    }
    assert_eq!(app.calls(), 0);
}

#[tokio::test]
async fn test_preflight_advertises_methods_and_headers() {
    let app = setup_test_app(InMemoryUsers::seeded());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/user")
        .header(header::ORIGIN, "http://console.example.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
        .body(Body::empty())
        .unwrap();
    let response = app.send_raw(request).await;
    let headers = response.headers();

    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://console.example.test"
    );

    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_uppercase();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }

    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    for name in [
        "authorization",
        "origin",
        "accept",
        "content-type",
        "content-length",
        "accept-encoding",
    ] {
        assert!(allowed.contains(name), "missing {name} in {allowed}");
    }
}

#[tokio::test]
async fn test_cors_mirrors_origin_on_regular_requests() {
    let app = setup_test_app(InMemoryUsers::seeded());

    let mut request = request("GET", "/roles", Some(&admin_token()), None);
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://elsewhere.test".parse().unwrap());
    let response = app.send_raw(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://elsewhere.test"
    );
}

#[tokio::test]
async fn test_failures_are_json() {
    let app = setup_test_app(InMemoryUsers::seeded());

    let response = app.send_raw(request("GET", "/roles", None, None)).await;
    assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );
}

#[tokio::test]
async fn test_every_response_carries_a_request_id() {
    let app = setup_test_app(InMemoryUsers::seeded());

    let first = app
        .send_raw(request("GET", "/roles", Some(&admin_token()), None))
        .await;
    let second = app
        .send_raw(request("GET", "/roles", Some(&admin_token()), None))
        .await;

    let first_id = first.headers()["x-request-id"].to_str().unwrap().to_string();
    let second_id = second.headers()["x-request-id"].to_str().unwrap().to_string();
    assert!(!first_id.is_empty());
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_supplied_request_id_is_echoed() {
    let app = setup_test_app(InMemoryUsers::seeded());

    let mut request = request("GET", "/roles", None, None);
    request
        .headers_mut()
        .insert("x-request-id", "trace-42".parse().unwrap());
    let response = app.send_raw(request).await;

    assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(response.headers()["x-request-id"], "trace-42");
}

#[tokio::test]
async fn test_metrics_endpoint_is_public() {
    let app = setup_test_app(InMemoryUsers::seeded());

    app.send(request("GET", "/roles", Some(&admin_token()), None))
        .await;
    let (status, text) = app.send_text(request("GET", "/metrics", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("rolekeeper_request_latency_seconds"));
    assert!(text.contains("method=\"get_roles\""));
    assert!(text.contains("error=\"false\""));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = setup_test_app(InMemoryUsers::seeded());

    let (status, body) = app
        .send(request("GET", "/api-docs/openapi.json", None, None))
        .await;
    assert_eq!(status, StatusCode::OK);

    let paths = body["paths"].as_object().unwrap();
    for path in ["/roles", "/user", "/usersrole", "/user/{user}"] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
    assert_ne!(body["info"]["title"], Value::Null);
}

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

use rolekeeper::metrics::init_metrics;
use rolekeeper::modules::users::service::{UserOperations, decorate};
use rolekeeper::router::init_router;
use rolekeeper::state::AppState;
use rolekeeper_config::{AccessConfig, CorsConfig, JwtConfig};
use rolekeeper_core::{AppError, ErrorKind};
use rolekeeper_models::{NewUser, Role, User, UserUpdate};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

/// Well-known role ids (must match the migration)
pub mod roles {
    pub const ADMINISTRATOR: i32 = 1;
    pub const OPERATOR: i32 = 2;
    pub const USER: i32 = 3;
}

/// In-memory stand-in for the PostgreSQL store with the same error semantics.
pub struct InMemoryUsers {
    roles: Vec<Role>,
    users: Mutex<BTreeMap<String, (i32, Option<NaiveDate>)>>,
    default_role_id: i32,
    calls: Arc<AtomicUsize>,
}

impl InMemoryUsers {
    pub fn seeded() -> Self {
        let role = |id: i32, name: &str| Role {
            id,
            role_name: name.to_string(),
        };

        Self {
            roles: vec![
                role(roles::ADMINISTRATOR, "administrator"),
                role(roles::OPERATOR, "operator"),
                role(roles::USER, "user"),
            ],
            users: Mutex::new(BTreeMap::new()),
            default_role_id: roles::USER,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of operation calls that reached the store.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn with_user(self, user_name: &str, role_id: i32) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(user_name.to_string(), (role_id, NaiveDate::from_ymd_opt(2024, 1, 1)));
        self
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn resolve(&self, user_name: &str, role_id: i32, create_time: Option<NaiveDate>) -> User {
        let role = self.roles.iter().find(|r| r.id == role_id).unwrap();
        User {
            user_name: user_name.to_string(),
            role_name: role.role_name.clone(),
            role_id,
            create_time,
        }
    }
}

#[async_trait]
impl UserOperations for InMemoryUsers {
    async fn get_roles(&self) -> Result<Vec<Role>, AppError> {
        self.touch();
        Ok(self.roles.clone())
    }

    async fn get_user(&self, user_name: &str, role: Option<&str>) -> Result<User, AppError> {
        self.touch();
        let users = self.users.lock().unwrap();
        users
            .get(user_name)
            .map(|(role_id, created)| self.resolve(user_name, *role_id, *created))
            .filter(|user| role.is_none_or(|r| r.eq_ignore_ascii_case(&user.role_name)))
            .ok_or_else(|| AppError::not_found(anyhow!("User {} not found", user_name)))
    }

    async fn get_users_role(&self) -> Result<Vec<User>, AppError> {
        self.touch();
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .map(|(name, (role_id, created))| self.resolve(name, *role_id, *created))
            .collect())
    }

    async fn add_user(&self, user: NewUser) -> Result<(), AppError> {
        self.touch();
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.user_name) {
            return Err(ErrorKind::AlreadyExists.into());
        }
        users.insert(
            user.user_name,
            (self.default_role_id, Some(Utc::now().date_naive())),
        );
        Ok(())
    }

    async fn update_user(&self, update: UserUpdate) -> Result<(), AppError> {
        self.touch();
        let mut users = self.users.lock().unwrap();
        let Some(entry) = users.get_mut(&update.user_name) else {
            return Err(AppError::not_found(anyhow!(
                "User {} not found",
                update.user_name
            )));
        };
        // The foreign key is only checked against a row that matched.
        if !self.roles.iter().any(|r| r.id == update.role_id) {
            return Err(ErrorKind::InconsistentIds.into());
        }
        *entry = (update.role_id, Some(Utc::now().date_naive()));
        Ok(())
    }

    async fn delete_user(&self, user_name: &str) -> Result<(), AppError> {
        self.touch();
        match self.users.lock().unwrap().remove(user_name) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(anyhow!("User {} not found", user_name))),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub calls: Arc<AtomicUsize>,
    pub metrics_handle: PrometheusHandle,
}

impl TestApp {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn send_raw(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends one request and returns the status and the body as text.
    pub async fn send_text(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.send_raw(request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Sends one request and returns the status and the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, text) = self.send_text(request).await;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, body)
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
    }
}

pub fn setup_test_app(store: InMemoryUsers) -> TestApp {
    let (request_metrics, metrics_handle) = init_metrics().unwrap();
    let calls = store.calls();

    let state = AppState {
        operations: decorate(store, request_metrics),
        jwt_config: test_jwt_config(),
        access_config: AccessConfig::default(),
        cors_config: CorsConfig::default(),
        metrics_handle: metrics_handle.clone(),
    };

    TestApp {
        router: init_router(state),
        calls,
        metrics_handle,
    }
}

pub fn token_for(username: &str, role: &str) -> String {
    encode(
        &Header::default(),
        &json!({"username": username, "role": role}),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token_for("root", "administrator")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", bearer(token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

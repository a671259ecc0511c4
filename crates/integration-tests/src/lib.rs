//! Integration tests for Tenant Console.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tenant-console-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `evaluator_properties` - evaluator and gate behavior over the catalog tables
//! - `console_http` - console routes driven in-process through the router
//!
//! [`TestContext`] builds the console router around a fixed operator
//! directory, so HTTP tests need no network, files, or environment.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use tower::ServiceExt;

use tenant_console::config::{ConsoleConfig, LogFormat};
use tenant_console::models::{AccessKeyDigest, Operator, OperatorDirectory};
use tenant_console::{AppState, PanelPolicies};
use tenant_console_core::{Panel, Role};

/// A directory entry used by tests: email, panel, role, and access key.
pub struct TestOperator {
    pub email: &'static str,
    pub panel: Panel,
    pub role: Role,
    pub access_key: &'static str,
}

impl TestOperator {
    #[must_use]
    pub fn new(email: &'static str, panel: Panel, role: impl Into<Role>) -> Self {
        Self {
            email,
            panel,
            role: role.into(),
            access_key: email,
        }
    }

    fn to_operator(&self) -> Operator {
        Operator {
            email: self.email.to_string(),
            name: self.email.split('@').next().unwrap_or(self.email).to_string(),
            panel: self.panel,
            role: self.role.clone(),
            key_sha256: AccessKeyDigest::of(self.access_key),
        }
    }
}

/// The default operators: one per catalog role, plus one with an unknown role.
///
/// Each operator's access key is their email.
#[must_use]
pub fn default_operators() -> Vec<TestOperator> {
    vec![
        TestOperator::new("root@admin.test", Panel::Admin, "super_admin"),
        TestOperator::new("admin@admin.test", Panel::Admin, "admin"),
        TestOperator::new("editor@admin.test", Panel::Admin, "editor"),
        TestOperator::new("viewer@admin.test", Panel::Admin, "viewer"),
        TestOperator::new("owner@vendor.test", Panel::Vendor, "vendor_owner"),
        TestOperator::new("agent@vendor.test", Panel::Vendor, "agent"),
        TestOperator::new("ghost@vendor.test", Panel::Vendor, "ghost"),
    ]
}

/// In-process console with a fixed directory.
pub struct TestContext {
    router: Router,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new(PanelPolicies::default(), &default_operators())
    }
}

impl TestContext {
    /// Build a console around `policies` and `operators`.
    #[must_use]
    pub fn new(policies: PanelPolicies, operators: &[TestOperator]) -> Self {
        let config = ConsoleConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            operators_file: PathBuf::from("operators.yaml"),
            permissions_file: None,
            log_format: LogFormat::Text,
            sentry: None,
            tls: None,
        };
        let directory =
            OperatorDirectory::from_operators(operators.iter().map(TestOperator::to_operator))
                .unwrap();

        Self {
            router: tenant_console::app(AppState::new(config, policies, directory)),
        }
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sign in through the JSON endpoint and return the session cookie.
    pub async fn login(&self, email: &str, access_key: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/auth/login",
                None,
                &serde_json::json!({ "email": email, "access_key": access_key }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "login failed for {email}");
        session_cookie(&response).unwrap()
    }

    /// Sign in as one of [`default_operators`].
    pub async fn login_as(&self, email: &'static str) -> String {
        self.login(email, email).await
    }

    /// `GET path` with an optional session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::get(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// `POST path` with a JSON body and an optional session cookie.
    pub async fn post_json(
        &self,
        path: &str,
        cookie: Option<&str>,
        body: &serde_json::Value,
    ) -> Response<Body> {
        self.send(json_request("POST", path, cookie, body)).await
    }
}

/// Build a JSON request.
#[must_use]
pub fn json_request(
    method: &str,
    path: &str,
    cookie: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// The `name=value` part of the session cookie set by `response`.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(tenant_console::middleware::SESSION_COOKIE_NAME))
        .and_then(|value| value.split(';').next())
        .map(ToString::to_string)
}

/// Read a response body as a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

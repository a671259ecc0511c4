//! Console routes driven in-process through the router.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;

use tenant_console::PanelPolicies;
use tenant_console_core::{Panel, Role};
use tenant_console_integration_tests::{
    TestContext, TestOperator, body_json, body_string, session_cookie,
};

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::default();
    let response = ctx.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_api_requires_login() {
    let ctx = TestContext::default();

    for path in ["/api/capabilities", "/api/roles"] {
        let response = ctx.get(path, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
    }

    let response = ctx
        .post_json("/api/capabilities/check", None, &json!({ "can": "plans:view" }))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_html_redirects_to_login() {
    let ctx = TestContext::default();
    let response = ctx.get("/", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/auth/login");
}

#[tokio::test]
async fn test_json_login_returns_operator() {
    let ctx = TestContext::default();
    let response = ctx
        .post_json(
            "/api/auth/login",
            None,
            &json!({ "email": "EDITOR@admin.test", "access_key": "editor@admin.test" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_some());
    assert_eq!(
        body_json(response).await,
        json!({
            "email": "editor@admin.test",
            "name": "editor",
            "panel": "admin",
            "role": "editor",
        })
    );
}

#[tokio::test]
async fn test_json_login_wrong_key() {
    let ctx = TestContext::default();
    let response = ctx
        .post_json(
            "/api/auth/login",
            None,
            &json!({ "email": "editor@admin.test", "access_key": "viewer@admin.test" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_form_login_and_dashboard() {
    let ctx = TestContext::default();
    let response = ctx
        .send(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "email=viewer%40admin.test&access_key=viewer%40admin.test",
                ))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    let cookie = session_cookie(&response).unwrap();

    let response = ctx.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Admin Panel"));
    assert!(html.contains("No Access"));
    assert!(!html.contains("New plan"));
}

#[tokio::test]
async fn test_form_login_failure_rerenders_page() {
    let ctx = TestContext::default();
    let response = ctx
        .send(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("email=nobody%40admin.test&access_key=guess"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        body_string(response)
            .await
            .contains("Invalid email or access key")
    );
}

#[tokio::test]
async fn test_logout_ends_session() {
    let ctx = TestContext::default();
    let cookie = ctx.login_as("admin@admin.test").await;

    let response = ctx.post_json("/api/auth/logout", Some(&cookie), &json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx.get("/api/capabilities", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Capabilities
// =============================================================================

#[tokio::test]
async fn test_capabilities_lists_granted_permissions() {
    let ctx = TestContext::default();
    let cookie = ctx.login_as("agent@vendor.test").await;

    let response = ctx.get("/api/capabilities", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "panel": "vendor",
            "role": "agent",
            "known_role": true,
            "permissions": ["cards:view", "enquiries:view"],
        })
    );
}

#[tokio::test]
async fn test_unknown_role_has_no_capabilities() {
    let ctx = TestContext::default();
    let cookie = ctx.login_as("ghost@vendor.test").await;

    let body = body_json(ctx.get("/api/capabilities", Some(&cookie)).await).await;
    assert_eq!(body["known_role"], json!(false));
    assert_eq!(body["permissions"], json!([]));

    let response = ctx.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_string(response)
            .await
            .contains("Your role has no permissions in this panel")
    );
}

#[tokio::test]
async fn test_check_reflects_evaluator() {
    let ctx = TestContext::default();
    let cookie = ctx.login_as("editor@admin.test").await;

    let response = ctx
        .post_json(
            "/api/capabilities/check",
            Some(&cookie),
            &json!({
                "can": "plans:edit",
                "can_any": ["plans:delete", "plans:edit"],
                "can_all": ["plans:edit", "plans:delete"],
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "can": true, "can_any": true, "can_all": false })
    );
}

#[tokio::test]
async fn test_check_empty_lists() {
    let ctx = TestContext::default();
    let cookie = ctx.login_as("ghost@vendor.test").await;

    let response = ctx
        .post_json(
            "/api/capabilities/check",
            Some(&cookie),
            &json!({ "can_any": [], "can_all": [] }),
        )
        .await;
    assert_eq!(
        body_json(response).await,
        json!({ "can_any": false, "can_all": true })
    );
}

#[tokio::test]
async fn test_check_malformed_permission_is_false() {
    let ctx = TestContext::default();
    let cookie = ctx.login_as("root@admin.test").await;

    let response = ctx
        .post_json(
            "/api/capabilities/check",
            Some(&cookie),
            &json!({ "can": "PLANS" }),
        )
        .await;
    assert_eq!(body_json(response).await, json!({ "can": false }));
}

#[tokio::test]
async fn test_check_without_query_is_bad_request() {
    let ctx = TestContext::default();
    let cookie = ctx.login_as("root@admin.test").await;

    let response = ctx
        .post_json("/api/capabilities/check", Some(&cookie), &json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Server-side enforcement
// =============================================================================

#[tokio::test]
async fn test_roles_forbidden_without_permission() {
    let ctx = TestContext::default();

    for email in ["viewer@admin.test", "editor@admin.test", "agent@vendor.test"] {
        let cookie = ctx.login_as(email).await;
        let response = ctx.get("/api/roles", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{email}");
    }
}

#[tokio::test]
async fn test_roles_allowed_for_admin() {
    let ctx = TestContext::default();

    for email in ["root@admin.test", "admin@admin.test"] {
        let cookie = ctx.login_as(email).await;
        let response = ctx.get("/api/roles", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{email}");
    }
}

#[tokio::test]
async fn test_roles_lists_panel_table() {
    let ctx = TestContext::default();
    let cookie = ctx.login_as("owner@vendor.test").await;

    let response = ctx.get("/api/roles", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["panel"], json!("vendor"));
    assert_eq!(
        body["roles"]["agent"],
        json!(["cards:view", "enquiries:view"])
    );
    assert!(body["roles"].get("super_admin").is_none());
}

#[tokio::test]
async fn test_numeric_role_from_permissions_file() {
    let policies = PanelPolicies::from_yaml(
        std::path::Path::new("permissions.yaml"),
        "admin:\n  7: [roles:view]\n",
    )
    .unwrap();
    let operators = [TestOperator::new("seven@admin.test", Panel::Admin, Role::from(7))];
    let ctx = TestContext::new(policies, &operators);

    let cookie = ctx.login_as("seven@admin.test").await;
    let response = ctx.get("/api/roles", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["roles"],
        json!({ "7": ["roles:view"] })
    );
}

//! End-to-end tests driving the full router over an in-memory database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use erp_service::config::MIN_BCRYPT_COST;
use erp_service::infrastructure::crypto::jwt::JwtConfig;
use erp_service::infrastructure::database::run_migrations;
use erp_service::{create_api_router, init_database, ApiContext, DatabaseConfig};

struct TestApp {
    router: Router,
    token: String,
}

impl TestApp {
    async fn new() -> Self {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&db).await.unwrap();

        let jwt = JwtConfig {
            secret: "integration-secret".into(),
            expiration_hours: 1,
            issuer: "erp-service".into(),
        };
        let ctx = ApiContext::new(db, jwt, MIN_BCRYPT_COST);
        ctx.user_service
            .bootstrap_admin("admin", "admin@example.com", "admin-pass", "admin")
            .await
            .unwrap();

        let mut app = Self {
            router: create_api_router(ctx),
            token: String::new(),
        };
        app.token = app.login("admin", "admin-pass").await;
        app
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let resp = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(&self.token), None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&self.token), Some(body))
            .await
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let (status, json) = self
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {json}");
        json["data"]["token"].as_str().unwrap().to_string()
    }

    async fn create_unit(&self, code: &str) -> String {
        let (status, json) = self
            .post("/api/v1/units", json!({"code": code, "name": code}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["data"]["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let app = TestApp::new().await;
    let (status, json) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"username": "admin@example.com", "password": "admin-pass"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["code"], "OK");
    assert_eq!(json["data"]["tokenType"], "Bearer");
    assert_eq!(json["data"]["expiresIn"], 3600);
    assert_eq!(json["data"]["user"]["username"], "admin");
    assert_eq!(json["data"]["user"]["role"]["name"], "admin");
    assert!(json["data"]["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let app = TestApp::new().await;
    let (status, json) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"username": "admin", "password": "wrong"})),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn list_is_paginated_with_meta() {
    let app = TestApp::new().await;
    for i in 0..12 {
        let (status, _) = app
            .post(
                "/api/v1/locations",
                json!({"code": format!("WH-{i:02}"), "name": format!("Warehouse {i}")}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, json) = app.get("/api/v1/locations?page=2&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"].as_array().unwrap().len(), 5);
    assert_eq!(
        json["meta"],
        json!({"total": 12, "page": 2, "limit": 5, "totalPages": 3})
    );

    // Lenient coercion: garbage falls back, out-of-range clamps
    let (_, json) = app.get("/api/v1/locations?page=abc&limit=500").await;
    assert_eq!(json["meta"]["page"], 1);
    assert_eq!(json["meta"]["limit"], 100);
    assert_eq!(json["data"].as_array().unwrap().len(), 12);

    let (_, json) = app.get("/api/v1/locations?page=0&limit=-3").await;
    assert_eq!(json["meta"]["page"], 1);
    assert_eq!(json["meta"]["limit"], 1);
    assert_eq!(json["meta"]["totalPages"], 12);
}

#[tokio::test]
async fn far_out_pages_are_empty_not_errors() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post("/api/v1/locations", json!({"code": "WH-1", "name": "Main"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = app
        .get("/api/v1/locations?page=9223372036854775807&limit=100")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!([]));
    assert_eq!(
        json["meta"],
        json!({"total": 1, "page": 92_233_720_368_547_758u64, "limit": 100, "totalPages": 1})
    );
}

#[tokio::test]
async fn empty_list_has_zero_pages() {
    let app = TestApp::new().await;
    let (status, json) = app.get("/api/v1/materials").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!([]));
    assert_eq!(
        json["meta"],
        json!({"total": 0, "page": 1, "limit": 10, "totalPages": 0})
    );
}

#[tokio::test]
async fn search_and_sort_apply_to_lists() {
    let app = TestApp::new().await;
    for (code, name) in [("KG", "Kilogram"), ("M", "Metre"), ("PCS", "Piece")] {
        app.post("/api/v1/units", json!({"code": code, "name": name}))
            .await;
    }

    let (_, json) = app.get("/api/v1/units?search=kilo").await;
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["data"][0]["code"], "KG");

    let (_, json) = app.get("/api/v1/units?sortBy=code&sortOrder=asc").await;
    let codes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["KG", "M", "PCS"]);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = TestApp::new().await;
    let (status, json) = app
        .send(Method::GET, "/api/v1/locations", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn non_admin_cannot_manage_users() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post(
            "/api/v1/users",
            json!({
                "username": "clerk",
                "email": "clerk@example.com",
                "password": "clerk-pass"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let clerk = app.login("clerk", "clerk-pass").await;
    let (status, json) = app
        .send(Method::GET, "/api/v1/users", Some(&clerk), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");

    // Master data stays reachable
    let (status, _) = app
        .send(Method::GET, "/api/v1/units", Some(&clerk), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_resources_are_not_found() {
    let app = TestApp::new().await;

    let (status, json) = app.get("/api/v1/materials/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");

    let (status, json) = app.get("/api/v1/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn invalid_body_is_validation_error() {
    let app = TestApp::new().await;

    let (status, json) = app
        .post("/api/v1/locations", json!({"code": "", "name": "Nameless"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["details"]["code"].is_array());

    let (status, json) = app
        .post(
            "/api/v1/materials",
            json!({"code": "STEEL", "name": "Steel", "unitOfMeasureId": "missing"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn duplicate_codes_conflict() {
    let app = TestApp::new().await;
    app.create_unit("KG").await;

    let (status, json) = app
        .post("/api/v1/units", json!({"code": "KG", "name": "Again"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn unit_in_use_cannot_be_deleted() {
    let app = TestApp::new().await;
    let unit_id = app.create_unit("KG").await;

    let (status, json) = app
        .post(
            "/api/v1/materials",
            json!({"code": "FLOUR", "name": "Flour", "unitOfMeasureId": unit_id}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["unitOfMeasure"]["code"], "KG");
    assert_eq!(json["data"]["isActive"], true);
    let material_id = json["data"]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/units/{unit_id}");
    let (status, json) = app
        .send(Method::DELETE, &uri, Some(&app.token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/materials/{material_id}"),
            Some(&app.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = app
        .send(Method::DELETE, &uri, Some(&app.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], unit_id);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let app = TestApp::new().await;
    let (_, json) = app
        .post(
            "/api/v1/locations",
            json!({"code": "WH-1", "name": "Main", "address": "Dock 4"}),
        )
        .await;
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, json) = app
        .send(
            Method::PUT,
            &format!("/api/v1/locations/{id}"),
            Some(&app.token),
            Some(json!({"isActive": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["isActive"], false);
    assert_eq!(json["data"]["name"], "Main");
    assert_eq!(json["data"]["address"], "Dock 4");
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = TestApp::new().await;
    let token = app.login("admin", "admin-pass").await;

    let (status, json) = app
        .send(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["username"], "admin");

    let (status, _) = app
        .send(Method::POST, "/api/v1/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = app
        .send(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn change_password_then_login_with_new_one() {
    let app = TestApp::new().await;
    let (status, _) = app
        .send(
            Method::PUT,
            "/api/v1/auth/change-password",
            Some(&app.token),
            Some(json!({"currentPassword": "admin-pass", "newPassword": "fresh-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.login("admin", "fresh-password").await;
}

#[tokio::test]
async fn admin_role_and_self_are_protected() {
    let app = TestApp::new().await;

    let (_, json) = app.get("/api/v1/roles?search=admin").await;
    let admin_role = json["data"][0]["id"].as_str().unwrap().to_string();
    let (status, json) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/roles/{admin_role}"),
            Some(&app.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (_, json) = app.get("/api/v1/auth/me").await;
    let me = json["data"]["id"].as_str().unwrap().to_string();
    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/users/{me}"),
            Some(&app.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn health_and_docs_are_public() {
    let app = TestApp::new().await;

    let (status, json) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");

    let (status, json) = app
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/api/v1/materials"].is_object());
}

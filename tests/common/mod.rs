#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use coursehub::coursehub_auth::create_access_token;
use coursehub::coursehub_config::{CorsConfig, JwtConfig};
use coursehub::coursehub_core::password::hash_password_with_cost;
use coursehub::coursehub_models::{Account, Role};
use coursehub::modules::auth::repository::AccountRepository;
use coursehub::router::init_router;
use coursehub::state::AppState;
use coursehub::store::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub jwt_config: JwtConfig,
}

pub struct TestAccount {
    pub account: Account,
    pub password: String,
    pub token: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let jwt_config = test_jwt_config();
    let state = AppState::new(store.clone(), jwt_config.clone(), CorsConfig::default());

    TestApp {
        router: init_router(state),
        store,
        jwt_config,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

impl TestApp {
    /// Inserts an account directly into the store and mints a token for it.
    pub async fn create_account(&self, email: &str, role: Option<Role>) -> TestAccount {
        let password = "testpass123".to_string();
        let hash = hash_password_with_cost(&password, 4).unwrap();
        let account = AccountRepository::insert(self.store.as_ref(), email, &hash, role)
            .await
            .unwrap()
            .unwrap();
        let token = create_access_token(account.id.into_inner(), email, &self.jwt_config).unwrap();

        TestAccount {
            account,
            password,
            token,
        }
    }

    pub async fn admin(&self) -> TestAccount {
        self.create_account(&generate_unique_email(), Some(Role::Admin))
            .await
    }

    pub async fn user(&self, email: &str) -> TestAccount {
        self.create_account(email, Some(Role::User)).await
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("DELETE", uri, token, None).await
    }

    pub async fn create_course(&self, admin_token: &str, title: &str, credits: i64) -> i64 {
        let (status, body) = self
            .post("/api/courses", Some(admin_token), course_body(title, credits))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn create_student(&self, admin_token: &str, last_name: &str, email: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/students",
                Some(admin_token),
                student_body("Test", last_name, email),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

pub fn course_body(title: &str, credits: i64) -> Value {
    json!({
        "title": title,
        "description": format!("{} description", title),
        "credits": credits,
        "start_date": "2025-02-01",
        "end_date": "2025-06-30",
        "is_active": true
    })
}

pub fn student_body(first_name: &str, last_name: &str, email: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": email,
        "date_of_birth": "2004-05-17",
        "enrollment_date": "2024-09-01"
    })
}

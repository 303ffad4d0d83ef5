mod common;

use axum::http::StatusCode;
use common::{generate_unique_email, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_roles_require_admin() {
    let app = setup_test_app();
    let user = app.user(&generate_unique_email()).await;

    let (status, _) = app.get("/api/roles/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/roles/users", Some(&user.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_as_admin() {
    let app = setup_test_app();
    let admin = app.admin().await;
    app.user(&generate_unique_email()).await;

    let (status, body) = app.get("/api/roles/users", Some(&admin.token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_manage_roles_view() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let user = app.user(&generate_unique_email()).await;

    let (status, body) = app
        .get(
            &format!("/api/roles/users/{}", user.account.id),
            Some(&admin.token),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_role"], "User");
    assert_eq!(body["available_roles"], json!(["Admin", "User"]));
}

#[tokio::test]
async fn test_promotion_replaces_role_and_applies_immediately() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let user = app.user(&generate_unique_email()).await;

    let (status, _) = app
        .post(
            "/api/courses",
            Some(&user.token),
            common::course_body("Before", 3),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put(
            &format!("/api/roles/users/{}", user.account.id),
            Some(&admin.token),
            json!({ "selected_role": "Admin" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["primary_role"], "Admin");

    // The same token now carries admin rights.
    let (status, _) = app
        .post(
            "/api/courses",
            Some(&user.token),
            common::course_body("After", 3),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.get("/api/auth/me", Some(&user.token)).await;
    assert_eq!(body["role"], "Admin");
}

#[tokio::test]
async fn test_unknown_role_clears_assignment() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let user = app.user(&generate_unique_email()).await;

    let (status, body) = app
        .put(
            &format!("/api/roles/users/{}", user.account.id),
            Some(&admin.token),
            json!({ "SelectedRole": "Superuser" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["primary_role"].is_null());

    let (status, _) = app.get("/api/students", Some(&user.token)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get("/api/enrollments", Some(&user.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manage_unknown_user_not_found() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let missing = uuid::Uuid::new_v4();

    let (status, _) = app
        .get(&format!("/api/roles/users/{}", missing), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .put(
            &format!("/api/roles/users/{}", missing),
            Some(&admin.token),
            json!({ "selected_role": "User" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_account_token_unauthorized() {
    let app = setup_test_app();
    let jwt = common::test_jwt_config();
    let token = coursehub::coursehub_auth::create_access_token(
        uuid::Uuid::new_v4(),
        "ghost@test.com",
        &jwt,
    )
    .unwrap();

    let (status, _) = app.get("/api/students", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

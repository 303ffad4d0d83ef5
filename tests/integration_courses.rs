mod common;

use axum::http::StatusCode;
use common::{course_body, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_anonymous_can_list_courses() {
    let app = setup_test_app();
    let admin = app.admin().await;
    app.create_course(&admin.token, "Algebra I", 4).await;

    let (status, body) = app.get("/api/courses", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["enrolled_course_ids"], json!([]));
}

#[tokio::test]
async fn test_credits_boundaries() {
    let app = setup_test_app();
    let admin = app.admin().await;

    for (credits, expected) in [
        (0, StatusCode::UNPROCESSABLE_ENTITY),
        (1, StatusCode::CREATED),
        (10, StatusCode::CREATED),
        (11, StatusCode::UNPROCESSABLE_ENTITY),
    ] {
        let (status, body) = app
            .post(
                "/api/courses",
                Some(&admin.token),
                course_body("Boundary", credits),
            )
            .await;
        assert_eq!(status, expected, "credits = {credits}");
        if expected == StatusCode::UNPROCESSABLE_ENTITY {
            assert_eq!(
                body["fields"]["credits"],
                json!(["Credits must be between 1 and 10"])
            );
        }
    }

    let (_, body) = app.get("/api/courses", None).await;
    assert_eq!(body["meta"]["total_count"], 2);
}

#[tokio::test]
async fn test_whitespace_only_title_and_description_rejected() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let mut body = course_body("   ", 3);
    body["description"] = json!("  ");

    let (status, body) = app.post("/api/courses", Some(&admin.token), body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["title"], json!(["Title is required"]));
    assert_eq!(body["fields"]["description"], json!(["Description is required"]));

    let (_, body) = app.get("/api/courses", None).await;
    assert_eq!(body["meta"]["total_count"], 0);
}

#[tokio::test]
async fn test_end_date_before_start_date_rejected() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let mut body = course_body("Backwards", 3);
    body["start_date"] = json!("2025-06-30");
    body["end_date"] = json!("2025-02-01");

    let (status, _) = app.post("/api/courses", Some(&admin.token), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_pagination_total_pages_is_ceiling() {
    let app = setup_test_app();
    let admin = app.admin().await;
    for i in 0..12 {
        app.create_course(&admin.token, &format!("Course {:02}", i), 3)
            .await;
    }

    let (_, body) = app.get("/api/courses", None).await;
    assert_eq!(body["meta"]["total_count"], 12);
    assert_eq!(body["meta"]["total_pages"], 3);
    assert_eq!(body["meta"]["has_previous"], false);
    assert_eq!(body["meta"]["has_next"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (_, body) = app.get("/api/courses?pageNumber=3", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["has_next"], false);

    let (status, body) = app.get("/api/courses?pageNumber=9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = app.get("/api/courses?pageNumber=0", None).await;
    assert_eq!(body["meta"]["page_index"], 1);

    let (status, body) = app.get("/api/courses?pageNumber=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["page_index"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_search_and_sort() {
    let app = setup_test_app();
    let admin = app.admin().await;
    app.create_course(&admin.token, "Algebra I", 4).await;
    app.create_course(&admin.token, "Algebra II", 6).await;
    app.create_course(&admin.token, "Biology", 2).await;

    let (_, body) = app.get("/api/courses?search=algebra", None).await;
    assert_eq!(body["meta"]["total_count"], 2);
    assert_eq!(body["search"], "algebra");

    let (_, body) = app.get("/api/courses?sortOrder=title_desc", None).await;
    assert_eq!(body["data"][0]["title"], "Biology");
    assert_eq!(body["sort_order"], "title_desc");

    let (_, body) = app.get("/api/courses?sortOrder=Credits", None).await;
    assert_eq!(body["data"][0]["credits"], 2);

    let (_, body) = app.get("/api/courses?sortOrder=bogus", None).await;
    assert_eq!(body["data"][0]["title"], "Algebra I");
    assert_eq!(body["sort_order"], "");
}

#[tokio::test]
async fn test_non_admin_cannot_manage_courses() {
    let app = setup_test_app();
    let user = app.user(&common::generate_unique_email()).await;

    let (status, _) = app
        .post("/api/courses", Some(&user.token), course_body("Nope", 3))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.post("/api/courses", None, course_body("Nope", 3)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_and_delete_course() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let id = app.create_course(&admin.token, "Chemistry", 3).await;
    let uri = format!("/api/courses/{}", id);

    let mut body = course_body("Chemistry II", 5);
    body["id"] = json!(id);
    let (status, body) = app.put(&uri, Some(&admin.token), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Chemistry II");
    assert_eq!(body["credits"], 5);

    let (status, _) = app.delete(&uri, Some(&admin.token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri, Some(&admin.token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Editing a course that has just been deleted resolves to not-found.
    let (status, _) = app
        .put(&uri, Some(&admin.token), course_body("Ghost", 3))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&uri, Some(&admin.token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_mismatched_body_id_is_not_found() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let id = app.create_course(&admin.token, "Physics", 3).await;

    let mut body = course_body("Physics", 3);
    body["id"] = json!(id + 100);
    let (status, _) = app
        .put(&format!("/api/courses/{}", id), Some(&admin.token), body)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_course_cascades_enrollments() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Geometry", 3).await;
    let student_id = app
        .create_student(&admin.token, "Euclid", &common::generate_unique_email())
        .await;

    let (status, _) = app
        .post(
            "/api/enrollments",
            Some(&admin.token),
            json!({ "student_id": student_id, "course_id": course_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.store.enrollment_count().await, 1);

    let (status, _) = app
        .delete(&format!("/api/courses/{}", course_id), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.store.enrollment_count().await, 0);
}

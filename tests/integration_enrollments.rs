mod common;

use axum::http::StatusCode;
use common::{generate_unique_email, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_grade_boundaries() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Statistics", 3).await;

    for (grade, expected) in [
        (1.9, StatusCode::UNPROCESSABLE_ENTITY),
        (2.0, StatusCode::CREATED),
        (6.0, StatusCode::CREATED),
        (6.1, StatusCode::UNPROCESSABLE_ENTITY),
    ] {
        let student_id = app
            .create_student(&admin.token, "Gauss", &generate_unique_email())
            .await;
        let (status, _) = app
            .post(
                "/api/enrollments",
                Some(&admin.token),
                json!({ "student_id": student_id, "course_id": course_id, "grade": grade }),
            )
            .await;
        assert_eq!(status, expected, "grade = {grade}");
    }

    assert_eq!(app.store.enrollment_count().await, 2);
}

#[tokio::test]
async fn test_admin_duplicate_enrollment_rejected() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Logic", 3).await;
    let student_id = app
        .create_student(&admin.token, "Boole", &generate_unique_email())
        .await;
    let body = json!({ "student_id": student_id, "course_id": course_id });

    let (status, _) = app
        .post("/api/enrollments", Some(&admin.token), body.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.post("/api/enrollments", Some(&admin.token), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Already enrolled in this course.");
    assert_eq!(app.store.enrollment_count().await, 1);
}

#[tokio::test]
async fn test_enrollment_with_unknown_student_rejected() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Logic", 3).await;

    let (status, _) = app
        .post(
            "/api/enrollments",
            Some(&admin.token),
            json!({ "student_id": 9999, "course_id": course_id }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_enrollment() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Calculus", 6).await;
    let student_id = app
        .create_student(&admin.token, "Newton", &generate_unique_email())
        .await;

    let (_, body) = app
        .post(
            "/api/enrollments",
            Some(&admin.token),
            json!({ "student_id": student_id, "course_id": course_id }),
        )
        .await;
    let id = body["id"].as_i64().unwrap();
    let uri = format!("/api/enrollments/{}", id);
    assert!(body["grade"].is_null());

    let (status, body) = app
        .put(
            &uri,
            Some(&admin.token),
            json!({
                "id": id,
                "student_id": student_id,
                "course_id": course_id,
                "grade": 5.5,
                "is_completed": true
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grade"], 5.5);
    assert_eq!(body["is_completed"], true);

    let (status, body) = app.get(&uri, Some(&admin.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course_title"], "Calculus");
    assert_eq!(body["student_last_name"], "Newton");

    let (status, _) = app.delete(&uri, Some(&admin.token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .put(
            &uri,
            Some(&admin.token),
            json!({ "student_id": student_id, "course_id": course_id }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_self_enroll_end_to_end() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let email = generate_unique_email();
    let algebra = app.create_course(&admin.token, "Algebra I", 4).await;
    let student_id = app.create_student(&admin.token, "Noether", &email).await;
    let user = app.user(&email).await;

    let (status, body) = app
        .post(
            "/api/enrollments/enroll",
            Some(&user.token),
            json!({ "courseId": algebra }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["student_id"], student_id);
    assert_eq!(body["course_id"], algebra);
    assert!(body["grade"].is_null());
    assert_eq!(body["is_completed"], false);

    // The course list marks the caller's enrolled courses.
    let (_, body) = app.get("/api/courses", Some(&user.token)).await;
    assert_eq!(body["enrolled_course_ids"], json!([algebra]));

    let (_, body) = app.get("/api/courses", None).await;
    assert_eq!(body["enrolled_course_ids"], json!([]));

    let (status, body) = app
        .post(
            "/api/enrollments/enroll",
            Some(&user.token),
            json!({ "course_id": algebra }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Already enrolled in this course.");
    assert_eq!(app.store.enrollment_count().await, 1);
}

#[tokio::test]
async fn test_admin_with_student_record_sees_enrolled_courses() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Topology", 5).await;
    let student_id = app
        .create_student(&admin.token, "Hausdorff", &admin.account.email)
        .await;

    let (status, _) = app
        .post(
            "/api/enrollments",
            Some(&admin.token),
            json!({ "student_id": student_id, "course_id": course_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/courses", Some(&admin.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrolled_course_ids"], json!([course_id]));
}

#[tokio::test]
async fn test_self_enroll_without_student_profile() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Algebra I", 4).await;
    let user = app.user(&generate_unique_email()).await;

    let (status, body) = app
        .post(
            "/api/enrollments/enroll",
            Some(&user.token),
            json!({ "course_id": course_id }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Student not found.");
}

#[tokio::test]
async fn test_self_enroll_unknown_course() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let email = generate_unique_email();
    app.create_student(&admin.token, "Lamarr", &email).await;
    let user = app.user(&email).await;

    let (status, _) = app
        .post(
            "/api/enrollments/enroll",
            Some(&user.token),
            json!({ "course_id": 424242 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_self_enroll_requires_user_role() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Algebra I", 4).await;

    let (status, _) = app
        .post(
            "/api/enrollments/enroll",
            Some(&admin.token),
            json!({ "course_id": course_id }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/api/enrollments/enroll",
            None,
            json!({ "course_id": course_id }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_enrollments_by_grade() {
    let app = setup_test_app();
    let admin = app.admin().await;
    let course_id = app.create_course(&admin.token, "Optics", 3).await;

    for grade in [json!(4.0), json!(null), json!(3.0)] {
        let student_id = app
            .create_student(&admin.token, "Huygens", &generate_unique_email())
            .await;
        app.post(
            "/api/enrollments",
            Some(&admin.token),
            json!({ "student_id": student_id, "course_id": course_id, "grade": grade }),
        )
        .await;
    }

    let (status, body) = app
        .get("/api/enrollments?sortOrder=Grade", Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["grade"], 3.0);
    assert_eq!(body["data"][1]["grade"], 4.0);
    assert!(body["data"][2]["grade"].is_null());

    let (_, body) = app
        .get("/api/enrollments?sortOrder=grade_desc", Some(&admin.token))
        .await;
    assert!(body["data"][0]["grade"].is_null());
    assert_eq!(body["data"][1]["grade"], 4.0);
}

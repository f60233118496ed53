mod common;

use common::{request_body, TestApp, FEEDBACK_URL};
use poem::http::StatusCode;
use serde_json::{json, Value};
use service_center_backend::types::internal::auth::Role;

async fn json_of(resp: poem::test::TestResponse) -> Value {
    resp.json().await.value().deserialize()
}

#[tokio::test]
async fn test_root_and_health_are_public() {
    let app = TestApp::new().await;

    let resp = app.client.get("/").send().await;
    resp.assert_status_is_ok();
    let body = json_of(resp).await;
    assert_eq!(body["message"], "Service Center API");

    let resp = app.client.get("/health").send().await;
    resp.assert_status_is_ok();
    assert_eq!(json_of(resp).await["status"], "healthy");
}

#[tokio::test]
async fn test_login_returns_bearer_token_and_role() {
    let app = TestApp::new().await;
    let id = app.seed_user("manager1", Role::Manager).await;

    let resp = app
        .client
        .post("/auth/login")
        .body_json(&json!({ "login": "manager1", "password": "manager1" }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = json_of(resp).await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["role"], "manager");
    assert_eq!(body["user_id"], id);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.seed_user("manager1", Role::Manager).await;

    let resp = app
        .client
        .post("/auth/login")
        .body_json(&json!({ "login": "manager1", "password": "nope" }))
        .send()
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_profile_without_password() {
    let app = TestApp::new().await;
    let (id, bearer) = app.sign_in("op", Role::Operator).await;

    let resp = app.client.get("/auth/me").header("Authorization", bearer).send().await;
    resp.assert_status_is_ok();

    let body = json_of(resp).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["role"], "operator");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_missing_token_carries_bearer_challenge() {
    let app = TestApp::new().await;

    let resp = app.client.get("/requests/").send().await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    resp.assert_header("WWW-Authenticate", "Bearer");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let resp = app
        .client
        .get("/users/")
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_request_listing_is_staff_only() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;
    let (_, customer) = app.sign_in("client1", Role::Customer).await;

    app.client
        .get("/requests/")
        .header("Authorization", manager)
        .send()
        .await
        .assert_status_is_ok();

    app.client
        .get("/requests/")
        .header("Authorization", customer)
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_customer_submission_forces_server_fields() {
    let app = TestApp::new().await;
    let (client_id, customer) = app.sign_in("client1", Role::Customer).await;

    let resp = app
        .client
        .post("/client/my-requests")
        .header("Authorization", customer.clone())
        .body_json(&json!({
            "equipment_type": "Printer",
            "equipment_model": "LaserJet 1020",
            "problem_description": "Paper jam",
            "priority": "urgent",
        }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = json_of(resp).await;
    assert_eq!(body["status"], "new");
    assert_eq!(body["priority"], "normal");
    assert_eq!(body["client_id"], client_id);
    assert!(body["master_id"].is_null());

    let resp = app
        .client
        .get("/client/my-requests")
        .header("Authorization", customer)
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_of(resp).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_customer_cannot_read_foreign_request() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;
    let (owner_id, _) = app.sign_in("owner", Role::Customer).await;
    let (_, stranger) = app.sign_in("stranger", Role::Customer).await;

    let mut body = request_body("Laptop");
    body["client_id"] = json!(owner_id);
    let resp = app
        .client
        .post("/requests/")
        .header("Authorization", manager)
        .body_json(&body)
        .send()
        .await;
    resp.assert_status_is_ok();
    let id = json_of(resp).await["id"].as_i64().unwrap();

    app.client
        .get(format!("/requests/{}", id))
        .header("Authorization", stranger.clone())
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.client
        .get(format!("/client/my-requests/{}", id))
        .header("Authorization", stranger)
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_update_keeps_absent_fields() {
    let app = TestApp::new().await;
    let (_, operator) = app.sign_in("op", Role::Operator).await;

    let mut body = request_body("Phone");
    body["repair_parts"] = json!("screen");
    let resp = app
        .client
        .post("/requests/")
        .header("Authorization", operator.clone())
        .body_json(&body)
        .send()
        .await;
    resp.assert_status_is_ok();
    let id = json_of(resp).await["id"].as_i64().unwrap();

    let resp = app
        .client
        .put(format!("/requests/{}", id))
        .header("Authorization", operator.clone())
        .body_json(&json!({ "status": "in_progress" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let updated = json_of(resp).await;
    assert_eq!(updated["status"], "in_progress");
    assert_eq!(updated["repair_parts"], "screen");
    assert_eq!(updated["equipment_type"], "Phone");

    // explicit null clears a nullable column
    let resp = app
        .client
        .put(format!("/requests/{}", id))
        .header("Authorization", operator)
        .body_json(&json!({ "repair_parts": null }))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert!(json_of(resp).await["repair_parts"].is_null());
}

#[tokio::test]
async fn test_unknown_master_reference_is_bad_request() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;

    let mut body = request_body("Router");
    body["master_id"] = json!(999);
    app.client
        .post("/requests/")
        .header("Authorization", manager)
        .body_json(&body)
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assign_extend_and_search() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;
    let master_id = app.seed_user("tech", Role::Specialist).await;

    let resp = app
        .client
        .post("/requests/")
        .header("Authorization", manager.clone())
        .body_json(&request_body("Washer"))
        .send()
        .await;
    let id = json_of(resp).await["id"].as_i64().unwrap();

    let resp = app
        .client
        .post(format!("/requests/{}/assign", id))
        .header("Authorization", manager.clone())
        .body_json(&json!({ "master_id": master_id }))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_of(resp).await["master_id"], master_id);

    let resp = app
        .client
        .post(format!("/requests/{}/extend", id))
        .header("Authorization", manager.clone())
        .body_json(&json!({ "new_deadline": "2024-04-15", "reason": "waiting for parts" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_of(resp).await["deadline"], "2024-04-15");

    let resp = app
        .client
        .get("/requests/search")
        .query("master_id", &master_id)
        .header("Authorization", manager)
        .send()
        .await;
    resp.assert_status_is_ok();
    let found = json_of(resp).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], id);
}

#[tokio::test]
async fn test_operator_cannot_assign_master() {
    let app = TestApp::new().await;
    let (_, operator) = app.sign_in("op", Role::Operator).await;

    app.client
        .post("/requests/1/assign")
        .header("Authorization", operator)
        .body_json(&json!({ "master_id": 1 }))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_statistics_are_scoped_for_customers() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;
    let (client_id, customer) = app.sign_in("client1", Role::Customer).await;

    let mut own = request_body("Laptop");
    own["client_id"] = json!(client_id);
    own["completion_date"] = json!("2024-03-05");
    for body in [own, request_body("Laptop"), request_body("Phone")] {
        app.client
            .post("/requests/")
            .header("Authorization", manager.clone())
            .body_json(&body)
            .send()
            .await
            .assert_status_is_ok();
    }

    let resp = app
        .client
        .get("/requests/stats/count")
        .header("Authorization", manager.clone())
        .send()
        .await;
    let counts = json_of(resp).await;
    assert_eq!(counts["total_requests"], 3);
    assert_eq!(counts["completed_requests"], 1);

    let resp = app
        .client
        .get("/requests/stats/count")
        .header("Authorization", customer.clone())
        .send()
        .await;
    assert_eq!(json_of(resp).await["total_requests"], 1);

    let resp = app
        .client
        .get("/requests/stats/avg-time")
        .header("Authorization", customer)
        .send()
        .await;
    let avg = json_of(resp).await;
    assert_eq!(avg["avg_repair_days"], 4.0);
    assert_eq!(avg["count_completed"], 1);

    let resp = app
        .client
        .get("/requests/stats/by-tech")
        .header("Authorization", manager)
        .send()
        .await;
    let rows = json_of(resp).await;
    let laptops = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["equipment_type"] == "Laptop")
        .unwrap();
    assert_eq!(laptops["count"], 2);
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;
    let (master_id, specialist) = app.sign_in("tech", Role::Specialist).await;
    let (_, operator) = app.sign_in("op", Role::Operator).await;

    let resp = app
        .client
        .post("/requests/")
        .header("Authorization", manager.clone())
        .body_json(&request_body("Fridge"))
        .send()
        .await;
    let request_id = json_of(resp).await["id"].as_i64().unwrap();

    let comment = json!({ "message": "Compressor replaced", "master_id": master_id, "request_id": request_id });
    app.client
        .post("/comments/")
        .header("Authorization", operator)
        .body_json(&comment)
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let resp = app
        .client
        .post("/comments/")
        .header("Authorization", specialist.clone())
        .body_json(&comment)
        .send()
        .await;
    resp.assert_status_is_ok();
    let comment_id = json_of(resp).await["id"].as_i64().unwrap();

    let resp = app
        .client
        .get("/comments/")
        .query("request_id", &request_id)
        .header("Authorization", specialist)
        .send()
        .await;
    assert_eq!(json_of(resp).await.as_array().unwrap().len(), 1);

    let resp = app
        .client
        .delete(format!("/comments/{}", comment_id))
        .header("Authorization", manager.clone())
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_of(resp).await["detail"], "Comment deleted");

    app.client
        .get(format!("/comments/{}", comment_id))
        .header("Authorization", manager)
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_user_clears_request_references() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;
    let client_id = app.seed_user("client1", Role::Customer).await;

    let mut body = request_body("TV");
    body["client_id"] = json!(client_id);
    let resp = app
        .client
        .post("/requests/")
        .header("Authorization", manager.clone())
        .body_json(&body)
        .send()
        .await;
    let request_id = json_of(resp).await["id"].as_i64().unwrap();

    let resp = app
        .client
        .delete(format!("/users/{}", client_id))
        .header("Authorization", manager.clone())
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_of(resp).await["detail"], "User deleted");

    let resp = app
        .client
        .get(format!("/requests/{}", request_id))
        .header("Authorization", manager)
        .send()
        .await;
    resp.assert_status_is_ok();
    assert!(json_of(resp).await["client_id"].is_null());
}

#[tokio::test]
async fn test_user_management_permissions() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;
    let (_, quality) = app.sign_in("qa", Role::QualityManager).await;

    let new_user = json!({
        "full_name": "Petr Ivanov",
        "phone": "89110000000",
        "login": "petr",
        "password": "pw",
        "role": "operator",
    });

    app.client
        .post("/users/")
        .header("Authorization", quality.clone())
        .body_json(&new_user)
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let resp = app
        .client
        .post("/users/")
        .header("Authorization", manager.clone())
        .body_json(&new_user)
        .send()
        .await;
    resp.assert_status_is_ok();
    let id = json_of(resp).await["id"].as_i64().unwrap();

    // duplicate login
    app.client
        .post("/users/")
        .header("Authorization", manager.clone())
        .body_json(&new_user)
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let resp = app
        .client
        .put(format!("/users/{}", id))
        .header("Authorization", quality)
        .body_json(&json!({ "phone": "89220000000", "password": "" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_of(resp).await["phone"], "89220000000");

    // empty password was ignored
    let resp = app
        .client
        .post("/auth/login")
        .body_json(&json!({ "login": "petr", "password": "pw" }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let resp = app
        .client
        .get("/users/")
        .query("limit", &1)
        .header("Authorization", manager)
        .send()
        .await;
    assert_eq!(json_of(resp).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_feedback_link_is_served() {
    let app = TestApp::new().await;
    let (_, customer) = app.sign_in("client1", Role::Customer).await;

    let resp = app
        .client
        .get("/qr/feedback")
        .header("Authorization", customer)
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(json_of(resp).await["feedback_url"], FEEDBACK_URL);
}

#[tokio::test]
async fn test_collection_paths_accept_trailing_slash() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;

    for path in ["/requests/", "/requests", "/users/", "/users", "/comments/", "/comments"] {
        app.client
            .get(path)
            .header("Authorization", manager.clone())
            .send()
            .await
            .assert_status_is_ok();
    }

    for path in ["/requests/", "/users/", "/comments/"] {
        let resp = app.client.get(path).send().await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
        resp.assert_header("WWW-Authenticate", "Bearer");
    }
}

#[tokio::test]
async fn test_paging_beyond_signed_range_is_bad_request() {
    let app = TestApp::new().await;
    let (_, manager) = app.sign_in("manager1", Role::Manager).await;

    app.client
        .get("/requests/")
        .query("limit", &i64::MAX)
        .header("Authorization", manager.clone())
        .send()
        .await
        .assert_status_is_ok();

    for param in ["limit", "skip"] {
        let resp = app
            .client
            .get("/requests/")
            .query(param, &(i64::MAX as u64 + 1))
            .header("Authorization", manager.clone())
            .send()
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(json_of(resp).await["status_code"], 400);
    }
}

#[tokio::test]
async fn test_missing_token_wins_over_malformed_body() {
    let app = TestApp::new().await;

    let resp = app
        .client
        .post("/requests/")
        .content_type("application/json")
        .body("{not json")
        .send()
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    resp.assert_header("WWW-Authenticate", "Bearer");
    let body = json_of(resp).await;
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["error"], "unauthorized");
}

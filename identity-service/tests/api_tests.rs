mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_login_new_contact_creates_subject() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "new@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(!body["data"]["access_token"].as_str().unwrap().is_empty());
    assert!(!body["data"]["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["subject"]["email_address"], "new@x.com");

    let subject_id = body["data"]["subject"]["id"].as_str().unwrap();

    // exactly one subject, one live code, one session
    assert_eq!(app.subject_count().await, 1);
    assert_eq!(
        app.count_for_subject("one_time_codes", "subject_id", subject_id)
            .await,
        1
    );
    assert_eq!(
        app.count_for_subject("refresh_sessions", "subject_id", subject_id)
            .await,
        1
    );
}

#[tokio::test]
async fn test_login_existing_subject_does_not_duplicate() {
    let app = TestApp::spawn().await;

    let first = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "existing@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    let first_body: serde_json::Value = first.json().await.expect("Failed to parse response");
    let subject_id = first_body["data"]["subject"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let second = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "existing@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(second.status(), StatusCode::OK);

    let second_body: serde_json::Value = second.json().await.expect("Failed to parse response");
    assert_eq!(second_body["data"]["subject"]["id"], subject_id.as_str());
    assert!(!second_body["data"]["access_token"]
        .as_str()
        .unwrap()
        .is_empty());

    // still one subject and one live code; sessions accumulate per login
    assert_eq!(app.subject_count().await, 1);
    assert_eq!(
        app.count_for_subject("one_time_codes", "subject_id", &subject_id)
            .await,
        1
    );
    assert_eq!(
        app.count_for_subject("refresh_sessions", "subject_id", &subject_id)
            .await,
        2
    );
}

#[tokio::test]
async fn test_login_by_phone() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "phone_number": "0241234567" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["subject"]["phone_number"], "0241234567");
    assert!(body["data"]["subject"]["email_address"].is_null());
}

#[tokio::test]
async fn test_login_rejects_malformed_contact() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "not-an-email@" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.subject_count().await, 0);
}

#[tokio::test]
async fn test_login_requires_a_contact() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_otp_is_single_use() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let subject_id = login["data"]["subject"]["id"].as_str().unwrap().to_string();

    let code = app.stored_otp(&subject_id).await;

    let response = app
        .post("/api/auth/verify-otp")
        .json(&json!({ "subject_id": subject_id, "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    // the code was consumed; replaying it fails
    let replay = app
        .post("/api/auth/verify-otp")
        .json(&json!({ "subject_id": subject_id, "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_otp_wrong_code() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let subject_id = login["data"]["subject"]["id"].as_str().unwrap().to_string();

    let code = app.stored_otp(&subject_id).await;
    let wrong_code = if code == "0000" { "0001" } else { "0000" };

    let response = app
        .post("/api/auth/verify-otp")
        .json(&json!({ "subject_id": subject_id, "code": wrong_code }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_otp_expired_code() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let subject_id = login["data"]["subject"]["id"].as_str().unwrap().to_string();

    let code = app.stored_otp(&subject_id).await;
    app.expire_otp(&subject_id).await;

    let response = app
        .post("/api/auth/verify-otp")
        .json(&json!({ "subject_id": subject_id, "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_rotates_the_token() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let subject_id = login["data"]["subject"]["id"].as_str().unwrap().to_string();
    let original_token = login["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    // a bare client so we control exactly which token each call presents
    let plain = reqwest::Client::new();

    let first = plain
        .post(format!(
            "{}/api/auth/refresh-token/{}",
            app.address, subject_id
        ))
        .header("Cookie", format!("refresh_token={}", original_token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(first.status(), StatusCode::OK);

    let first_body: serde_json::Value = first.json().await.expect("Failed to parse response");
    let rotated_token = first_body["data"]["refresh_token"].as_str().unwrap();
    assert_ne!(rotated_token, original_token);
    assert!(!first_body["data"]["access_token"]
        .as_str()
        .unwrap()
        .is_empty());

    // the original token was rotated away and must no longer verify
    let second = plain
        .post(format!(
            "{}/api/auth/refresh-token/{}",
            app.address, subject_id
        ))
        .header("Cookie", format!("refresh_token={}", original_token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/refresh-token/00000000-0000-0000-0000-000000000000")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_the_session() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let subject_id = login["data"]["subject"]["id"].as_str().unwrap().to_string();
    let access_token = login["data"]["access_token"].as_str().unwrap().to_string();
    let refresh_token = login["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    // cookie-store client still carries the login cookie
    let response = app
        .post_authenticated(&format!("/api/auth/logout/{}", subject_id), &access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    // the revoked session must not refresh
    let plain = reqwest::Client::new();
    let refresh = plain
        .post(format!(
            "{}/api/auth/refresh-token/{}",
            app.address, subject_id
        ))
        .header("Cookie", format!("refresh_token={}", refresh_token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_access_token() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let subject_id = login["data"]["subject"]["id"].as_str().unwrap();

    let response = app
        .post(&format!("/api/auth/logout/{}", subject_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_unknown_subject() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let access_token = login["data"]["access_token"].as_str().unwrap().to_string();

    let unknown = uuid::Uuid::new_v4();
    let response = app
        .post_authenticated(&format!("/api/auth/logout/{}", unknown), &access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_routes_reject_bad_credentials() {
    let app = TestApp::spawn().await;

    // no credentials
    let missing = app
        .get("/api/users")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    // forged token
    let forged = app
        .get_authenticated("/api/users", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(forged.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_subject_crud_workflow() {
    let app = TestApp::spawn().await;

    // 1. Create a subject explicitly
    let create = app
        .post("/api/users")
        .json(&json!({
            "display_name": "Ama",
            "email_address": "ama@x.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(create.status(), StatusCode::CREATED);

    let created: serde_json::Value = create.json().await.expect("Failed to parse response");
    let subject_id = created["data"]["id"].as_str().unwrap().to_string();

    // 2. Login to obtain a bearer token
    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let token = login["data"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(login["data"]["subject"]["id"], subject_id.as_str());

    // 3. Read
    let fetched: serde_json::Value = app
        .get_authenticated(&format!("/api/users/{}", subject_id), &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(fetched["data"]["display_name"], "Ama");

    let listed: serde_json::Value = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    // 4. Update
    let update = app
        .patch_authenticated(&format!("/api/users/{}", subject_id), &token)
        .json(&json!({ "display_name": "Akosua" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(update.status(), StatusCode::OK);

    let updated: serde_json::Value = update.json().await.expect("Failed to parse response");
    assert_eq!(updated["data"]["display_name"], "Akosua");
    assert_eq!(updated["data"]["email_address"], "ama@x.com");

    // 5. Delete
    let delete = app
        .delete_authenticated(&format!("/api/users/{}", subject_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    assert_eq!(app.subject_count().await, 0);
}

#[tokio::test]
async fn test_create_subject_requires_contact() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "display_name": "Ama" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_subject_duplicate_email() {
    let app = TestApp::spawn().await;

    app.post("/api/users")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/users")
        .json(&json!({ "email_address": "ama@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_employee_crud_workflow() {
    let app = TestApp::spawn().await;

    // employees require an authenticated creator
    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "manager@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let token = login["data"]["access_token"].as_str().unwrap().to_string();
    let subject_id = login["data"]["subject"]["id"].as_str().unwrap().to_string();

    // 1. Create
    let create = app
        .post_authenticated("/api/employees", &token)
        .json(&json!({
            "name": "Kofi Mensah",
            "email": "kofi@x.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(create.status(), StatusCode::CREATED);

    let created: serde_json::Value = create.json().await.expect("Failed to parse response");
    let employee_id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["created_by"], subject_id.as_str());

    // 2. Read
    let listed: serde_json::Value = app
        .get_authenticated("/api/employees", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let fetched: serde_json::Value = app
        .get_authenticated(&format!("/api/employees/{}", employee_id), &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(fetched["data"]["name"], "Kofi Mensah");

    // 3. Update
    let update = app
        .put_authenticated(&format!("/api/employees/{}", employee_id), &token)
        .json(&json!({ "name": "Kofi A. Mensah" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(update.status(), StatusCode::OK);

    let updated: serde_json::Value = update.json().await.expect("Failed to parse response");
    assert_eq!(updated["data"]["name"], "Kofi A. Mensah");

    // 4. Delete
    let delete = app
        .delete_authenticated(&format!("/api/employees/{}", employee_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    let missing = app
        .get_authenticated(&format!("/api/employees/{}", employee_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_employee_duplicate_email() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({ "email_address": "manager@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let token = login["data"]["access_token"].as_str().unwrap().to_string();

    app.post_authenticated("/api/employees", &token)
        .json(&json!({ "name": "Kofi", "email": "kofi@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post_authenticated("/api/employees", &token)
        .json(&json!({ "name": "Other Kofi", "email": "kofi@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn api_signup_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let json_request = json!({
        "name": "John Doe",
        "email": "john@example.com"
    });

    let res = app.post_signup(&json_request).await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );

    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["email"], "john@example.com");
    assert!(
        body["created_at"].is_string(),
        "created_at should be set on creation"
    );

    let (email, name): (String, String) = sqlx::query_as("SELECT email, name FROM pilot_signups")
        .fetch_one(app.mm.db())
        .await?;

    assert_eq!(email, "john@example.com");
    assert_eq!(name, "John Doe");

    Ok(())
}

#[tokio::test]
async fn api_signup_duplicate_email_is_a_400_and_leaves_one_row() -> Result<()> {
    let app = TestApp::spawn().await?;

    let json_request = json!({
        "name": "John Doe",
        "email": "john@example.com"
    });

    let res = app.post_signup(&json_request).await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Same email, different name: still a duplicate.
    let json_request = json!({
        "name": "Johnny Doe",
        "email": "john@example.com"
    });

    let res = app.post_signup(&json_request).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await?;
    assert_eq!(
        body["error"]["message"],
        "This email is already registered for the pilot program"
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pilot_signups")
        .fetch_one(app.mm.db())
        .await?;
    assert_eq!(count, 1, "The duplicate insert must not add a row");

    Ok(())
}

#[tokio::test]
async fn api_signup_unprocessable_entity() -> Result<()> {
    let app = TestApp::spawn().await?;

    let tests = [
        (
            json!({
                "name": "John Doe",
            }),
            "Missing email",
        ),
        (
            json!({
                "name": null,
                "email": "jd@example.com",
            }),
            "Null name",
        ),
        (json!({}), "Empty json"),
    ];

    for (json_request, params) in tests {
        let res = app.post_signup(&json_request).await?;
        assert_eq!(
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "Wrong response: ({}), Expected: ({}); for request with: {params}",
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    Ok(())
}

#[tokio::test]
async fn api_signup_returns_a_400_when_fields_are_present_but_invalid() -> Result<()> {
    let app = TestApp::spawn().await?;

    let cases = vec![
        (
            json!({
                "name": "",
                "email": "jd@example.com",
            }),
            "Empty name",
        ),
        (
            json!({
                "name": "John Doe",
                "email": "",
            }),
            "Empty email",
        ),
        (
            json!({
                "name": "John Doe",
                "email": "not an email",
            }),
            "Invalid email",
        ),
    ];

    for (body, description) in cases {
        let response = app.post_signup(&body).await?;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 BAD REQUEST the payload was {}.",
            description
        );
    }

    Ok(())
}

#[tokio::test]
async fn api_signups_list_preserves_creation_order() -> Result<()> {
    let app = TestApp::spawn().await?;

    let first = json!({ "name": "John Doe", "email": "john@example.com" });
    let second = json!({ "name": "Jane Doe", "email": "jane@example.com" });
    app.post_signup(&first).await?;
    app.post_signup(&second).await?;

    let res = app.get_signups("").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await?;
    let signups = body.as_array().expect("expected a json array");
    assert_eq!(signups.len(), 2);
    assert_eq!(signups[0]["email"], "john@example.com");
    assert_eq!(signups[1]["email"], "jane@example.com");

    Ok(())
}

#[tokio::test]
async fn api_signups_list_windows_with_skip_and_limit() -> Result<()> {
    let app = TestApp::spawn().await?;

    let first = json!({ "name": "John Doe", "email": "john@example.com" });
    let second = json!({ "name": "Jane Doe", "email": "jane@example.com" });
    app.post_signup(&first).await?;
    app.post_signup(&second).await?;

    let res = app.get_signups("?skip=1&limit=1").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await?;
    let signups = body.as_array().expect("expected a json array");
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0]["email"], "jane@example.com");

    Ok(())
}

#[tokio::test]
async fn api_signup_by_id_returns_the_stored_record() -> Result<()> {
    let app = TestApp::spawn().await?;

    let json_request = json!({ "name": "John Doe", "email": "john@example.com" });
    let created: serde_json::Value = app.post_signup(&json_request).await?.json().await?;

    let res = app.get_signups("/1").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await?;
    assert_eq!(body, created);

    Ok(())
}

#[tokio::test]
async fn api_signup_by_id_unknown_id_is_a_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get_signups("/999").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["error"]["message"], "Signup not found");

    Ok(())
}

#[tokio::test]
async fn api_signup_succeeds_even_when_notification_fails() -> Result<()> {
    // The test SMTP endpoint is unreachable, so the notification send fails;
    // the signup must succeed regardless.
    let app = TestApp::spawn_with_recipients(vec!["team@example.com".to_string()]).await?;

    let json_request = json!({
        "name": "John Doe",
        "email": "john@example.com"
    });

    let res = app.post_signup(&json_request).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pilot_signups")
        .fetch_one(app.mm.db())
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

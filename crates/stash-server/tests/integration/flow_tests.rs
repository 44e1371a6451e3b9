use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::integration::common::setup_test_app;

/// Walks one account through every endpoint, in the order a client would.
#[tokio::test]
async fn signup_to_bookmark_deletion() {
    let app = setup_test_app();
    let credentials = json!({ "email": "user@fromtest.com", "password": "super-secret" });

    // Auth: signup
    let (status, _) = app
        .send(Method::POST, "/auth/signup", None, Some(json!({ "password": "super-secret" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "signup without email");

    let (status, _) = app
        .send(Method::POST, "/auth/signup", None, Some(json!({ "email": "user@fromtest.com" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "signup without password");

    let (status, _) = app.send(Method::POST, "/auth/signup", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "signup without body");

    let (status, json) = app
        .send(Method::POST, "/auth/signup", None, Some(credentials.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["token_type"], "Bearer");

    // Auth: signin
    let (status, _) = app
        .send(Method::POST, "/auth/signin", None, Some(json!({ "password": "super-secret" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "signin without email");

    let (status, _) = app
        .send(Method::POST, "/auth/signin", None, Some(json!({ "email": "user@fromtest.com" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "signin without password");

    let (status, _) = app.send(Method::POST, "/auth/signin", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "signin without body");

    let (status, json) = app
        .send(Method::POST, "/auth/signin", None, Some(credentials))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["access_token"].as_str().unwrap().to_string();
    let token = Some(token.as_str());

    // Users
    let (status, me) = app.send(Method::GET, "/users/me", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "user@fromtest.com");
    assert!(me.get("passwordHash").is_none());

    let (status, edited) = app
        .send(
            Method::PATCH,
            "/users",
            token,
            Some(json!({ "firstName": "Vlad", "email": "vlad@codewithvlad.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["firstName"], "Vlad");
    assert_eq!(edited["email"], "vlad@codewithvlad.com");
    assert_eq!(edited["id"], me["id"]);

    // Bookmarks
    let (status, list) = app.send(Method::GET, "/bookmarks", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, created) = app
        .send(
            Method::POST,
            "/bookmarks",
            token,
            Some(json!({
                "title": "First Bookmark",
                "link": "https://www.youtube.com/watch?v=d6WC5n9G_sM",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["userId"], me["id"]);

    let (status, list) = app.send(Method::GET, "/bookmarks", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, fetched) = app
        .send(Method::GET, &format!("/bookmarks/{id}"), token, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());

    let (status, updated) = app
        .send(
            Method::PATCH,
            &format!("/bookmarks/{id}"),
            token,
            Some(json!({
                "title": "Kubernetes Course - Full Beginners Tutorial (Containerize Your Apps!)",
                "description": "Learn how to use Kubernetes in this complete course.",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated["title"],
        "Kubernetes Course - Full Beginners Tutorial (Containerize Your Apps!)"
    );
    assert_eq!(
        updated["description"],
        "Learn how to use Kubernetes in this complete course."
    );
    assert_eq!(updated["link"], created["link"]);

    let (status, body) = app
        .send(Method::DELETE, &format!("/bookmarks/{id}"), token, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, list) = app.send(Method::GET, "/bookmarks", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::integration::common::setup_test_app;

#[tokio::test]
async fn create_requires_title_and_link() {
    let app = setup_test_app();
    let token = app.signup("user@fromtest.com", "pw").await;

    for body in [
        json!({ "link": "https://example.com" }),
        json!({ "title": "No link" }),
        json!({ "title": "   ", "link": "https://example.com" }),
        json!({ "title": "Bad link", "link": "not a url" }),
        json!({ "title": "Bad scheme", "link": "ftp://example.com/file" }),
        json!({ "title": "a\u{0}b", "link": "https://example.com" }),
        json!({ "title": "NUL", "link": "https://example.com", "description": "\u{0}" }),
    ] {
        let (status, json) = app
            .send(Method::POST, "/bookmarks", Some(&token), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {body}");
        assert_eq!(json["error"], "validation_error");
    }

    assert_eq!(app.store.bookmark_count(), 0);
}

#[tokio::test]
async fn create_without_body_is_400() {
    let app = setup_test_app();
    let token = app.signup("user@fromtest.com", "pw").await;

    let (status, _) = app
        .send(Method::POST, "/bookmarks", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_preserves_creation_order() {
    let app = setup_test_app();
    let token = app.signup("user@fromtest.com", "pw").await;

    for title in ["one", "two", "three"] {
        app.create_bookmark(&token, title).await;
    }

    let (status, json) = app.send(Method::GET, "/bookmarks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["one", "two", "three"]);
}

#[tokio::test]
async fn other_users_bookmarks_are_invisible() {
    let app = setup_test_app();
    let alice = app.signup("alice@fromtest.com", "pw").await;
    let mallory = app.signup("mallory@fromtest.com", "pw").await;
    let created = app.create_bookmark(&alice, "Private").await;
    let uri = format!("/bookmarks/{}", created["id"].as_str().unwrap());

    let (status, list) = app.send(Method::GET, "/bookmarks", Some(&mallory), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, _) = app.send(Method::GET, &uri, Some(&mallory), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::PATCH, &uri, Some(&mallory), Some(json!({ "title": "pwned" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&mallory), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Private");
}

#[tokio::test]
async fn unknown_id_is_404() {
    let app = setup_test_app();
    let token = app.signup("user@fromtest.com", "pw").await;
    let uri = format!("/bookmarks/{}", Uuid::new_v4());

    let (status, json) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_400() {
    let app = setup_test_app();
    let token = app.signup("user@fromtest.com", "pw").await;

    let (status, json) = app
        .send(Method::GET, "/bookmarks/not-a-uuid", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn edit_validates_supplied_fields() {
    let app = setup_test_app();
    let token = app.signup("user@fromtest.com", "pw").await;
    let created = app.create_bookmark(&token, "Original").await;
    let uri = format!("/bookmarks/{}", created["id"].as_str().unwrap());

    let (status, _) = app
        .send(Method::PATCH, &uri, Some(&token), Some(json!({ "link": "nope" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = app
        .send(Method::PATCH, &uri, Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Original");
}

#[tokio::test]
async fn blank_description_is_dropped_on_create() {
    let app = setup_test_app();
    let token = app.signup("user@fromtest.com", "pw").await;

    let (status, json) = app
        .send(
            Method::POST,
            "/bookmarks",
            Some(&token),
            Some(json!({
                "title": "  Trimmed  ",
                "link": "https://example.com/a",
                "description": "   ",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["title"], "Trimmed");
    assert!(json["description"].is_null());
}

#[tokio::test]
async fn blank_description_clears_on_edit() {
    let app = setup_test_app();
    let token = app.signup("user@fromtest.com", "pw").await;
    let created = app.create_bookmark(&token, "Described").await;
    let uri = format!("/bookmarks/{}", created["id"].as_str().unwrap());

    let (_, json) = app
        .send(Method::PATCH, &uri, Some(&token), Some(json!({ "description": "notes" })))
        .await;
    assert_eq!(json["description"], "notes");

    let (status, json) = app
        .send(Method::PATCH, &uri, Some(&token), Some(json!({ "description": "  " })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["description"].is_null());
}

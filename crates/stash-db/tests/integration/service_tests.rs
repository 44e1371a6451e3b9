use stash_core::models::{BookmarkPatch, NewBookmark, UserPatch};
use stash_core::{AppError, BookmarkService, UserService};

use crate::integration::common::{create_user, setup_test_db};

fn first_bookmark() -> NewBookmark {
    NewBookmark {
        title: "First Bookmark".into(),
        link: "https://www.youtube.com/watch?v=jfKfPfyJRdk".into(),
        description: None,
    }
}

#[tokio::test]
async fn oversized_and_nul_input_never_reaches_postgres() {
    let (db, _container) = setup_test_db().await;
    let user = create_user(&db, "user@fromtest.com").await;
    let users = UserService::new(db.clone());
    let bookmarks = BookmarkService::new(db.clone());

    let err = users
        .edit(
            user.id,
            UserPatch {
                first_name: Some("a".repeat(300)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let err = bookmarks
        .create(
            user.id,
            NewBookmark {
                title: "a\u{0}b".into(),
                ..first_bookmark()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let created = bookmarks.create(user.id, first_bookmark()).await.unwrap();
    let err = bookmarks
        .edit(
            user.id,
            created.id,
            BookmarkPatch {
                description: Some("\u{0}".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn longest_accepted_name_fits_the_column() {
    let (db, _container) = setup_test_db().await;
    let user = create_user(&db, "user@fromtest.com").await;
    let users = UserService::new(db);

    let edited = users
        .edit(
            user.id,
            UserPatch {
                first_name: Some("é".repeat(255)),
                last_name: Some("Lovelace".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(edited.first_name.as_deref().map(|n| n.chars().count()), Some(255));
    assert_eq!(edited.last_name.as_deref(), Some("Lovelace"));
}

#[tokio::test]
async fn blank_description_clears_stored_value() {
    let (db, _container) = setup_test_db().await;
    let user = create_user(&db, "user@fromtest.com").await;
    let bookmarks = BookmarkService::new(db);
    let created = bookmarks
        .create(
            user.id,
            NewBookmark {
                description: Some("notes".into()),
                ..first_bookmark()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.description.as_deref(), Some("notes"));

    let cleared = bookmarks
        .edit(
            user.id,
            created.id,
            BookmarkPatch {
                description: Some("   ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(cleared.description, None);
    assert_eq!(cleared.title, created.title);
}

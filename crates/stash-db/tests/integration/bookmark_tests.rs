use stash_core::AppError;
use stash_core::models::{BookmarkPatch, NewBookmark};
use uuid::Uuid;

use crate::integration::common::{create_user, setup_test_db};

fn first_bookmark() -> NewBookmark {
    NewBookmark {
        title: "First Bookmark".into(),
        link: "https://www.youtube.com/watch?v=jfKfPfyJRdk".into(),
        description: None,
    }
}

#[tokio::test]
async fn create_list_get_bookmark() {
    let (db, _container) = setup_test_db().await;
    let user = create_user(&db, "user@fromtest.com").await;
    let repo = db.bookmark_repo();

    assert!(repo.list(user.id).await.unwrap().is_empty());

    let created = repo.create(user.id, &first_bookmark()).await.unwrap();
    assert_eq!(created.user_id, user.id);
    assert_eq!(created.title, "First Bookmark");
    assert_eq!(created.description, None);

    let listed = repo.list(user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    let fetched = repo
        .get(user.id, created.id)
        .await
        .unwrap()
        .expect("Should find the bookmark");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_is_in_creation_order() {
    let (db, _container) = setup_test_db().await;
    let user = create_user(&db, "user@fromtest.com").await;
    let repo = db.bookmark_repo();

    let mut ids = Vec::new();
    for title in ["one", "two", "three"] {
        let bookmark = NewBookmark {
            title: title.into(),
            ..first_bookmark()
        };
        ids.push(repo.create(user.id, &bookmark).await.unwrap().id);
        // Small delay to ensure different timestamps
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let listed: Vec<Uuid> = repo
        .list(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn partial_update_keeps_unsupplied_fields() {
    let (db, _container) = setup_test_db().await;
    let user = create_user(&db, "user@fromtest.com").await;
    let repo = db.bookmark_repo();
    let created = repo.create(user.id, &first_bookmark()).await.unwrap();

    let updated = repo
        .update(
            user.id,
            created.id,
            &BookmarkPatch {
                title: Some("Edited title".into()),
                description: Some("Edited description".into()),
                link: None,
            },
        )
        .await
        .unwrap()
        .expect("Bookmark should exist");

    assert_eq!(updated.title, "Edited title");
    assert_eq!(updated.description.as_deref(), Some("Edited description"));
    assert_eq!(updated.link, created.link);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn rows_are_scoped_to_owner() {
    let (db, _container) = setup_test_db().await;
    let alice = create_user(&db, "alice@fromtest.com").await;
    let mallory = create_user(&db, "mallory@fromtest.com").await;
    let repo = db.bookmark_repo();
    let created = repo.create(alice.id, &first_bookmark()).await.unwrap();

    assert!(repo.list(mallory.id).await.unwrap().is_empty());
    assert!(repo.get(mallory.id, created.id).await.unwrap().is_none());
    assert!(
        repo.update(
            mallory.id,
            created.id,
            &BookmarkPatch {
                title: Some("pwned".into()),
                ..Default::default()
            }
        )
        .await
        .unwrap()
        .is_none()
    );
    assert!(!repo.delete(mallory.id, created.id).await.unwrap());

    let untouched = repo.get(alice.id, created.id).await.unwrap().unwrap();
    assert_eq!(untouched.title, "First Bookmark");
}

#[tokio::test]
async fn delete_removes_row() {
    let (db, _container) = setup_test_db().await;
    let user = create_user(&db, "user@fromtest.com").await;
    let repo = db.bookmark_repo();
    let created = repo.create(user.id, &first_bookmark()).await.unwrap();

    assert!(repo.delete(user.id, created.id).await.unwrap());
    assert!(!repo.delete(user.id, created.id).await.unwrap());
    assert!(repo.list(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_for_unknown_user_is_not_found() {
    let (db, _container) = setup_test_db().await;

    let err = db
        .bookmark_repo()
        .create(Uuid::new_v4(), &first_bookmark())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

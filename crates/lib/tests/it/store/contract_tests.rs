//! Behaviour every UserStore backend must share.

use qna::User;

use crate::helpers::*;

#[tokio::test]
async fn test_save_assigns_id_and_user_is_findable() {
    let store = test_store().await;

    let saved = store
        .save(User::new("abc", "p1", "Alice", "alice@example.com"))
        .await
        .unwrap();
    let id = saved.id.expect("save should assign an id");

    assert_eq!(store.find_by_id(id).await.unwrap(), Some(saved.clone()));
    assert_eq!(store.find_by_user_id("abc").await.unwrap(), Some(saved));
}

#[tokio::test]
async fn test_lookups_miss_cleanly() {
    let store = test_store().await;

    assert_eq!(store.find_by_id(1).await.unwrap(), None);
    assert_eq!(store.find_by_user_id("nobody").await.unwrap(), None);
    assert!(store.find_all().await.unwrap().is_empty());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_all_is_ordered_by_id() {
    let store = test_store().await;
    for name in ["carol", "alice", "bob"] {
        store.save(User::new(name, "pw", name, "")).await.unwrap();
    }

    let users = store.find_all().await.unwrap();
    let user_ids: Vec<_> = users.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(user_ids, ["carol", "alice", "bob"]);

    let ids: Vec<_> = users.iter().map(|u| u.id.unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_save_existing_updates_in_place() {
    let store = test_store().await;
    let mut user = store
        .save(User::new("abc", "p1", "Alice", "a@example.com"))
        .await
        .unwrap();
    let id = user.id;

    user.password = "p2".to_string();
    user.email = "alice@example.org".to_string();
    let saved = store.save(user.clone()).await.unwrap();

    assert_eq!(saved.id, id);
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.find_by_user_id("abc").await.unwrap(), Some(user));
}

#[tokio::test]
async fn test_duplicate_user_id_is_a_conflict() {
    let store = test_store().await;
    store.save(User::new("abc", "p1", "", "")).await.unwrap();

    let err = store
        .save(User::new("abc", "other", "", ""))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.module(), "store");

    let kept = store.find_by_user_id("abc").await.unwrap().unwrap();
    assert_eq!(kept.password, "p1");
}

#[tokio::test]
async fn test_update_of_unknown_id_is_not_found() {
    let store = test_store().await;
    let ghost = User {
        id: Some(77),
        ..User::new("ghost", "pw", "", "")
    };

    let err = store.save(ghost).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.count().await.unwrap(), 0);
}

//! Profile updates: every guard must leave the stored record untouched

use qna::{
    Page,
    controller::{LOGIN_FORM, USER_LIST},
};

use crate::helpers::*;

#[tokio::test]
async fn test_update_without_login_redirects_and_keeps_record() {
    let controller = seeded_controller().await;
    let before = stored_user(&controller, 1).await;
    let (_sessions, session) = anonymous_session().await;

    let page = controller
        .update_user(1, update_form("p1", "New", "new@example.com"), &session)
        .await
        .unwrap();

    assert_eq!(page, Page::Redirect(LOGIN_FORM));
    assert_eq!(stored_user(&controller, 1).await, before);
}

#[tokio::test]
async fn test_update_of_other_user_is_forbidden() {
    let controller = seeded_controller().await;
    controller
        .create_user(Some(signup_form("def", "p2")))
        .await
        .unwrap();
    let before = stored_user(&controller, 1).await;
    let (_sessions, session) = logged_in_session(&controller, "def", "p2").await;

    let err = controller
        .update_user(1, update_form("p1", "Hijacked", "evil@example.com"), &session)
        .await
        .unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(stored_user(&controller, 1).await, before);
}

#[tokio::test]
async fn test_update_with_wrong_password_is_rejected() {
    let controller = seeded_controller().await;
    let before = stored_user(&controller, 1).await;
    let (_sessions, session) = logged_in_session(&controller, "abc", "p1").await;

    let err = controller
        .update_user(1, update_form("wrong", "New", "new@example.com"), &session)
        .await
        .unwrap_err();

    assert!(err.is_password_mismatch());
    assert_eq!(stored_user(&controller, 1).await, before);
}

#[tokio::test]
async fn test_update_without_password_is_validation_error() {
    let controller = seeded_controller().await;
    let before = stored_user(&controller, 1).await;
    let (_sessions, session) = logged_in_session(&controller, "abc", "p1").await;
    let mut form = update_form("p1", "New", "new@example.com");
    form.password = None;

    let err = controller.update_user(1, form, &session).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(stored_user(&controller, 1).await, before);
}

#[tokio::test]
async fn test_update_with_blank_password_is_a_mismatch() {
    let controller = seeded_controller().await;
    let before = stored_user(&controller, 1).await;
    let (_sessions, session) = logged_in_session(&controller, "abc", "p1").await;

    for blank in ["", "   "] {
        let err = controller
            .update_user(1, update_form(blank, "New", "new@example.com"), &session)
            .await
            .unwrap_err();
        assert!(err.is_password_mismatch(), "{blank:?} gave {err}");
    }
    assert_eq!(stored_user(&controller, 1).await, before);
}

#[tokio::test]
async fn test_update_changes_only_mutable_fields() {
    let controller = seeded_controller().await;
    let (_sessions, session) = logged_in_session(&controller, "abc", "p1").await;
    let mut form = update_form("p1", "Alice Updated", "alice@example.org");
    // A submitted userId must not rename the account.
    form.user_id = Some("renamed".to_string());

    let page = controller.update_user(1, form, &session).await.unwrap();
    assert_eq!(page, Page::Redirect(USER_LIST));

    let after = stored_user(&controller, 1).await;
    assert_eq!(after.id, Some(1));
    assert_eq!(after.user_id, "abc");
    assert_eq!(after.password, "p1");
    assert_eq!(after.name, "Alice Updated");
    assert_eq!(after.email, "alice@example.org");
    assert!(
        controller
            .store()
            .find_by_user_id("renamed")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_update_refreshes_session_user() {
    let controller = seeded_controller().await;
    let (_sessions, session) = logged_in_session(&controller, "abc", "p1").await;

    controller
        .update_user(1, update_form("p1", "Fresh", "fresh@example.com"), &session)
        .await
        .unwrap();

    let in_session = session.user().await.unwrap();
    assert_eq!(in_session, stored_user(&controller, 1).await);
    assert_eq!(in_session.name, "Fresh");
}

#[tokio::test]
async fn test_password_checked_against_store_not_session() {
    let controller = seeded_controller().await;
    let (_sessions, session) = logged_in_session(&controller, "abc", "p1").await;

    // Change the stored password behind the session's back.
    let mut stored = stored_user(&controller, 1).await;
    stored.password = "rotated".to_string();
    controller.store().save(stored).await.unwrap();

    let err = controller
        .update_user(1, update_form("p1", "Stale", "stale@example.com"), &session)
        .await
        .unwrap_err();
    assert!(err.is_password_mismatch());

    controller
        .update_user(1, update_form("rotated", "Fresh", "fresh@example.com"), &session)
        .await
        .unwrap();
    assert_eq!(stored_user(&controller, 1).await.name, "Fresh");
}

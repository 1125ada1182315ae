//! Profile viewing and the update form

use qna::{Page, View, controller::LOGIN_FORM};

use crate::helpers::*;

#[tokio::test]
async fn test_profile_returns_stored_user_unchanged() {
    let controller = seeded_controller().await;
    let stored = stored_user(&controller, 1).await;

    let page = controller.profile(1).await.unwrap();
    assert_eq!(page, Page::View(View::Profile { user: stored }));
    assert_eq!(page.view().unwrap().name(), "users/profile");
}

#[tokio::test]
async fn test_profile_of_missing_id_is_not_found() {
    let controller = seeded_controller().await;

    let err = controller.profile(999).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_form_requires_login() {
    let controller = seeded_controller().await;
    let (_sessions, session) = anonymous_session().await;

    let page = controller.update_form(1, &session).await.unwrap();
    assert_eq!(page, Page::Redirect(LOGIN_FORM));
}

#[tokio::test]
async fn test_update_form_for_own_profile() {
    let controller = seeded_controller().await;
    let (_sessions, session) = logged_in_session(&controller, "abc", "p1").await;

    let page = controller.update_form(1, &session).await.unwrap();
    let Some(View::UpdateForm { user }) = page.view() else {
        panic!("expected update form, got {page:?}");
    };
    assert_eq!(user.user_id, "abc");
    assert_eq!(page.view().unwrap().name(), "users/updateForm");
}

#[tokio::test]
async fn test_update_form_for_other_user_is_forbidden() {
    let controller = seeded_controller().await;
    controller
        .create_user(Some(signup_form("def", "p2")))
        .await
        .unwrap();
    let (_sessions, session) = logged_in_session(&controller, "def", "p2").await;

    let err = controller.update_form(1, &session).await.unwrap_err();
    assert!(err.is_forbidden());
}

//! Sign-up: form rendering and user creation

use qna::{Page, UserForm, View, controller::USER_LIST};

use crate::helpers::*;

#[tokio::test]
async fn test_sign_up_form_renders() {
    let controller = test_controller().await;
    let page = controller.sign_up_form();
    assert_eq!(page, Page::View(View::SignUpForm));
    assert_eq!(page.view().unwrap().name(), "users/form");
}

#[tokio::test]
async fn test_created_user_is_retrievable_by_user_id_and_id() {
    let controller = test_controller().await;

    let page = controller
        .create_user(Some(signup_form("abc", "p1")))
        .await
        .unwrap();
    assert_eq!(page, Page::Redirect(USER_LIST));

    let by_user_id = controller
        .store()
        .find_by_user_id("abc")
        .await
        .unwrap()
        .expect("user should exist after sign-up");
    let id = by_user_id.id.expect("store should assign an id");
    assert_eq!(stored_user(&controller, id).await, by_user_id);
    assert_eq!(by_user_id.password, "p1");
    assert_eq!(by_user_id.email, "abc@example.com");
}

#[tokio::test]
async fn test_missing_form_is_validation_error() {
    let controller = test_controller().await;

    let err = controller.create_user(None).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(controller.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_form_without_user_id_is_validation_error() {
    let controller = test_controller().await;
    let form = UserForm {
        user_id: Some(String::new()),
        ..signup_form("ignored", "p1")
    };

    let err = controller.create_user(Some(form)).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(controller.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_sign_up_is_conflict() {
    let controller = seeded_controller().await;

    let err = controller
        .create_user(Some(signup_form("abc", "other")))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(controller.store().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_shows_all_users() {
    let controller = seeded_controller().await;
    controller
        .create_user(Some(signup_form("def", "p2")))
        .await
        .unwrap();

    let page = controller.list_users().await.unwrap();
    let Some(View::UserList { users }) = page.view() else {
        panic!("expected user list, got {page:?}");
    };
    let user_ids: Vec<_> = users.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(user_ids, ["abc", "def"]);
}

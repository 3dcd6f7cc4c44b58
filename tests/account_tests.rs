mod common;

use actix_web::{App, cookie::Cookie, http::StatusCode, http::header::LOCATION, test};
use healthy_swap::{
    auth::{SESSION_COOKIE, SessionKeys},
    configure,
    forms::SignUpForm,
    store::UserStore,
};

use common::{SECRET, app_state, create_user, session_cookie, store};

fn sign_up_form(username: &str, password1: &str, password2: &str) -> SignUpForm {
    SignUpForm {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password1: password1.to_string(),
        password2: password2.to_string(),
    }
}

#[core::prelude::v1::test]
fn test_sign_up_validation_messages() {
    let errors = sign_up_form("", "", "").validate();
    assert!(errors.contains("username"));
    assert!(errors.contains("password1"));
    assert!(errors.contains("password2"));

    let errors = sign_up_form("carol", "long enough pass", "other pass").validate();
    assert_eq!(
        errors.get("password2").unwrap(),
        ["The two password fields didn't match."]
    );

    let errors = sign_up_form("carol", "1234", "1234").validate();
    let messages = errors.get("password2").unwrap();
    assert!(messages.iter().any(|m| m.contains("too short")));
    assert!(messages.iter().any(|m| m.contains("entirely numeric")));

    let errors = sign_up_form("bad name!", "long enough pass", "long enough pass").validate();
    assert!(errors.contains("username"));

    let mut form = sign_up_form("carol", "Carol123!", "Carol123!");
    form.email = "not-an-email".to_string();
    assert!(form.validate().contains("email"));

    assert!(sign_up_form("carol", "Carol123!", "Carol123!").validate().is_empty());
}

#[core::prelude::v1::test]
fn test_session_keys_reject_unusable_lifetimes() {
    for hours in [0, -5, i64::MAX] {
        assert!(SessionKeys::new(SECRET, hours).is_err(), "{hours}");
    }

    let keys = SessionKeys::new(SECRET, 24).unwrap();
    let cookie = keys.cookie("token".to_string());
    assert_eq!(cookie.max_age().unwrap().whole_hours(), 24);
}

#[actix_rt::test]
async fn test_account_requires_session() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(store()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/account").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/sign-in");

    let req = test::TestRequest::get()
        .uri("/account")
        .cookie(Cookie::new(SESSION_COOKIE, "forged.token.value"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_rt::test]
async fn test_sign_up_signs_in_and_opens_account() {
    let store = store();
    let app = test::init_service(
        App::new()
            .app_data(app_state(store.clone()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/sign-up")
        .set_form([
            ("username", "carol"),
            ("email", "carol@example.com"),
            ("password1", "Carol123!"),
            ("password2", "Carol123!"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/account");

    let session = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .unwrap()
        .into_owned();
    assert!(store.user_by_username("carol").unwrap().is_some());

    let req = test::TestRequest::get()
        .uri("/account")
        .cookie(session)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "carol");
    assert_eq!(body["email"], "carol@example.com");
}

#[actix_rt::test]
async fn test_sign_up_rejects_duplicate_username() {
    let store = store();
    create_user(&store, "alice");
    let app = test::init_service(
        App::new()
            .app_data(app_state(store))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/sign-up")
        .set_form([
            ("username", "alice"),
            ("email", "other@example.com"),
            ("password1", "Another123!"),
            ("password2", "Another123!"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["username"][0],
        "A user with that username already exists."
    );
    assert_eq!(body["form"]["username"], "alice");
    assert!(body["form"].get("password1").is_none());
}

#[actix_rt::test]
async fn test_sign_in_and_sign_out() {
    let store = store();
    create_user(&store, "alice");
    let app = test::init_service(
        App::new()
            .app_data(app_state(store))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/sign-in")
        .set_form([("username", "alice"), ("password", "wrong-password")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["errors"]["__all__"].is_array());

    let req = test::TestRequest::post()
        .uri("/sign-in")
        .set_form([("username", "alice"), ("password", "correct-horse")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(
        resp.response()
            .cookies()
            .any(|cookie| cookie.name() == SESSION_COOKIE && !cookie.value().is_empty())
    );

    let req = test::TestRequest::post().uri("/sign-out").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/");
    let removal = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .unwrap();
    assert!(removal.value().is_empty());
}

#[actix_rt::test]
async fn test_session_for_existing_user_opens_account() {
    let store = store();
    let alice = create_user(&store, "alice");
    let app = test::init_service(
        App::new()
            .app_data(app_state(store))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/account")
        .cookie(session_cookie(&alice))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], alice.id);
    assert_eq!(body["page_title"], "Your account");
}

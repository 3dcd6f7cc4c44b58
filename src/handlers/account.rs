use actix_web::{HttpResponse, get, http::header::LOCATION, post, web};
use chrono::NaiveDateTime;
use serde::Serialize;

use super::{FormPage, HEADER_IMG, PageContext};
use crate::auth::{AuthenticatedUser, SessionKeys};
use crate::error::{AppError, FieldErrors};
use crate::forms::{SignInForm, SignUpForm, authenticate, register};
use crate::models::User;
use crate::state::AppState;

pub const ACCOUNT_PATH: &str = "/account";

const SIGN_UP_TITLE: &str = "Sign up";
const SIGN_IN_TITLE: &str = "Sign in";

/// Sets the session cookie and sends the user to their account page.
fn signed_in(state: &AppState, user: &User) -> Result<HttpResponse, AppError> {
    let token = state.sessions.issue(user)?;

    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, ACCOUNT_PATH))
        .cookie(state.sessions.cookie(token))
        .finish())
}

fn form_page<F: Serialize>(title: &'static str, form: F, errors: FieldErrors) -> FormPage<F> {
    FormPage {
        context: PageContext::titled(title),
        form,
        errors,
    }
}

#[get("/sign-up")]
pub async fn sign_up_form() -> HttpResponse {
    HttpResponse::Ok().json(form_page(
        SIGN_UP_TITLE,
        SignUpForm::default(),
        FieldErrors::new(),
    ))
}

#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<AppState>,
    form: web::Form<SignUpForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let submitted = form.clone();
    let store = state.store.clone();
    let cost = state.bcrypt_cost;

    match web::block(move || register(store.as_ref(), &submitted, cost)).await? {
        Ok(user) => signed_in(&state, &user),
        Err(AppError::Validation(errors)) => {
            Ok(HttpResponse::UnprocessableEntity().json(form_page(SIGN_UP_TITLE, form, errors)))
        }
        Err(e) => Err(e),
    }
}

#[get("/sign-in")]
pub async fn sign_in_form() -> HttpResponse {
    HttpResponse::Ok().json(form_page(
        SIGN_IN_TITLE,
        SignInForm::default(),
        FieldErrors::new(),
    ))
}

#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<AppState>,
    form: web::Form<SignInForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let submitted = form.clone();
    let store = state.store.clone();

    match web::block(move || authenticate(store.as_ref(), &submitted)).await? {
        Ok(user) => {
            log::info!("User {} signed in", user.id);
            signed_in(&state, &user)
        }
        Err(AppError::Validation(errors)) => {
            Ok(HttpResponse::UnprocessableEntity().json(form_page(SIGN_IN_TITLE, form, errors)))
        }
        Err(e) => Err(e),
    }
}

#[post("/sign-out")]
pub async fn sign_out() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, "/"))
        .cookie(SessionKeys::removal_cookie())
        .finish()
}

#[derive(Serialize)]
struct AccountPage {
    id: i32,
    username: String,
    email: String,
    date_joined: NaiveDateTime,
    img: &'static str,
    page_title: &'static str,
}

#[get("/account")]
pub async fn account(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let store = state.store.clone();
    let user_id = user.id;

    // A valid token for a deleted account is treated as no session.
    let user = web::block(move || store.user(user_id))
        .await??
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(AccountPage {
        id: user.id,
        username: user.username,
        email: user.email,
        date_joined: user.date_joined,
        img: HEADER_IMG,
        page_title: "Your account",
    }))
}

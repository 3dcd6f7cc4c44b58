use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;

use super::{HEADER_IMG, PageQuery};
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{SavedSubstitute, SubstitutePair};
use crate::pagination::{Page, Paginator, SAVED_PAGE_SIZE};
use crate::saved::{list_saved, unsave};
use crate::state::AppState;

const TITLE: &str = "Your saved foods";

#[derive(Serialize)]
struct SavedPage {
    title: &'static str,
    img: &'static str,
    products_saved: Page<SavedSubstitute>,
    paginate: bool,
    page_title: &'static str,
}

fn saved_page(saved: Vec<SavedSubstitute>, page: Option<&str>) -> HttpResponse {
    HttpResponse::Ok().json(SavedPage {
        title: TITLE,
        img: HEADER_IMG,
        products_saved: Paginator::new(saved, SAVED_PAGE_SIZE).page(page),
        paginate: true,
        page_title: TITLE,
    })
}

#[get("/saved")]
pub async fn list(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    params: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let store = state.store.clone();
    let user_id = user.id;

    let saved = web::block(move || list_saved(store.as_ref(), user_id)).await??;

    Ok(saved_page(saved, params.page.as_deref()))
}

/// Removes the posted substitute, then answers like `GET /saved`.
#[post("/saved")]
pub async fn remove(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    params: web::Query<PageQuery>,
    form: web::Form<SubstitutePair>,
) -> Result<HttpResponse, AppError> {
    let store = state.store.clone();
    let pair = form.into_inner();
    let user_id = user.id;

    let saved = web::block(move || {
        unsave(store.as_ref(), pair, user_id)?;
        list_saved(store.as_ref(), user_id)
    })
    .await??;

    Ok(saved_page(saved, params.page.as_deref()))
}

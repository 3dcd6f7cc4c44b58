use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthenticatedUser, Viewer};
use crate::error::AppError;
use crate::models::{Product, SubstitutePair};
use crate::nutrition::NutrientLevels;
use crate::pagination::{Page, Paginator, SEARCH_PAGE_SIZE};
use crate::recommend::{Recommendation, find_substitutes, save_and_exclude};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    pub page: Option<String>,
}

#[derive(Serialize)]
struct SearchPage {
    products: Page<Product>,
    paginate: bool,
    query: String,
    title: String,
    img: String,
    query_prod: i32,
    page_title: &'static str,
}

fn search_page(params: SearchQuery, recommendation: Recommendation) -> HttpResponse {
    let Recommendation {
        reference,
        candidates,
    } = recommendation;

    let products = Paginator::new(candidates, SEARCH_PAGE_SIZE).page(params.page.as_deref());

    HttpResponse::Ok().json(SearchPage {
        products,
        paginate: true,
        query: params.query,
        title: reference.product_name,
        img: reference.img,
        query_prod: reference.id_product,
        page_title: "Results",
    })
}

#[get("/search")]
pub async fn search(
    state: web::Data<AppState>,
    viewer: Viewer,
    params: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let params = params.into_inner();
    let store = state.store.clone();
    let query = params.query.clone();
    let user_id = viewer.user_id();

    let recommendation =
        web::block(move || find_substitutes(store.as_ref(), &query, user_id)).await??;

    Ok(search_page(params, recommendation))
}

/// Saves the posted substitute, then answers like `GET /search`.
#[post("/search")]
pub async fn save_substitute(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    params: web::Query<SearchQuery>,
    form: web::Form<SubstitutePair>,
) -> Result<HttpResponse, AppError> {
    let params = params.into_inner();
    let pair = form.into_inner();
    let store = state.store.clone();
    let query = params.query.clone();
    let user_id = user.id;

    let recommendation = web::block(move || {
        let mut recommendation = find_substitutes(store.as_ref(), &query, Some(user_id))?;
        save_and_exclude(store.as_ref(), &mut recommendation, pair, user_id)?;
        Ok::<_, AppError>(recommendation)
    })
    .await??;

    Ok(search_page(params, recommendation))
}

#[derive(Serialize)]
struct ProductDetail {
    id_product: i32,
    product: String,
    category: String,
    img: String,
    nutriscore: i32,
    nutrients: NutrientLevels,
    redirection: String,
    page_title: String,
}

#[get("/products/{id}")]
pub async fn product_detail(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = state.store.clone();

    let product = web::block(move || store.product(id))
        .await??
        .ok_or(AppError::NotFound)?;

    let nutrients = NutrientLevels::of(&product);

    Ok(HttpResponse::Ok().json(ProductDetail {
        id_product: product.id_product,
        page_title: product.product_name.clone(),
        product: product.product_name,
        category: product.category,
        img: product.img,
        nutriscore: product.nutriscore,
        nutrients,
        redirection: product.url,
    }))
}

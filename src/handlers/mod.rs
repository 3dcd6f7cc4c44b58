use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

pub mod account;
pub mod catalog;
pub mod pages;
pub mod saved;

/// Banner image for pages that have no product picture of their own.
pub const HEADER_IMG: &str =
    "https://authentic-visit.jp/wp-content/uploads/2017/12/gregoire-jeanneau-1451361.jpg";

/// `?page=` on listings. Kept raw so that junk values fall back to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Title block shared by the static and form pages.
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub title: &'static str,
    pub img: &'static str,
    pub page_title: &'static str,
}

impl PageContext {
    pub const fn titled(title: &'static str) -> Self {
        Self {
            title,
            img: HEADER_IMG,
            page_title: title,
        }
    }
}

/// A form page, re-rendered with its errors after a failed submission.
#[derive(Debug, Serialize)]
pub struct FormPage<F> {
    #[serde(flatten)]
    pub context: PageContext,
    pub form: F,
    pub errors: FieldErrors,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::health)
        .service(pages::index)
        .service(pages::contacts)
        .service(pages::legals)
        .service(catalog::search)
        .service(catalog::save_substitute)
        .service(catalog::product_detail)
        .service(saved::list)
        .service(saved::remove)
        .service(account::sign_up_form)
        .service(account::sign_up)
        .service(account::sign_in_form)
        .service(account::sign_in)
        .service(account::sign_out)
        .service(account::account);
}

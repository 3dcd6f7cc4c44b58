use actix_web::{HttpResponse, Responder, get};
use serde::Serialize;

use super::PageContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "Healthy swap API is running".to_string(),
    })
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "page_title": "Home"
    }))
}

#[get("/contacts")]
pub async fn contacts() -> impl Responder {
    HttpResponse::Ok().json(PageContext {
        title: "Contacts",
        page_title: "Contact us",
        ..PageContext::titled("Contacts")
    })
}

#[get("/legals")]
pub async fn legals() -> impl Responder {
    HttpResponse::Ok().json(PageContext::titled("Legal notice"))
}

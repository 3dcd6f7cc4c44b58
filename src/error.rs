use std::collections::BTreeMap;

use actix_web::{
    HttpResponse, ResponseError,
    error::BlockingError,
    http::{StatusCode, header::LOCATION},
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Where anonymous visitors are sent when a page needs a session.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Form-level key, for errors that belong to no single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Per-field form messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `Ok(())` when nothing was collected, otherwise a validation error.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid form submission")]
    Validation(FieldErrors),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Blocking task was cancelled")]
    Blocking,

    #[error("Session token error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),
}

impl From<BlockingError> for AppError {
    fn from(_: BlockingError) -> Self {
        AppError::Blocking
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    errors: &'a FieldErrors,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized => StatusCode::SEE_OTHER,
            AppError::Store(_)
            | AppError::Blocking
            | AppError::Session(_)
            | AppError::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(ErrorBody {
                error: "Not found",
            }),
            AppError::Validation(errors) => {
                HttpResponse::UnprocessableEntity().json(ValidationBody { errors })
            }
            AppError::Unauthorized => HttpResponse::SeeOther()
                .insert_header((LOCATION, SIGN_IN_PATH))
                .finish(),
            internal => {
                log::error!("Request failed: {}", internal);
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: "Internal server error",
                })
            }
        }
    }
}

//! Handler errors and their HTTP mapping.
//!
//! Every route returns `Result<_, ApiError>`; the status code for each failure
//! is decided here and nowhere else.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use folio_infra::document_store::StoreError;

use crate::app::dto::ContactResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Certificate listing failed in the store.
    #[error("{0}")]
    ListCertificates(StoreError),

    /// Certificate creation was rejected or could not be written.
    #[error("{0}")]
    CreateCertificate(StoreError),

    /// Contact submission failed, whichever step it failed at.
    #[error("contact submission failed")]
    ContactFailed,

    /// The request declared a JSON body that does not parse.
    #[error("{0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ListCertificates(_) | ApiError::ContactFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::CreateCertificate(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::ContactFailed => (status, axum::Json(ContactResponse::failed())).into_response(),
            other => json_message(status, other.to_string()),
        }
    }
}

/// `{"message": ...}` body with the given status.
pub fn json_message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "message": message.into() }))).into_response()
}

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

pub mod certificates;
pub mod contact;

/// Router for the public API.
///
/// Unknown paths and unsupported methods on known paths both answer 404.
pub fn router() -> Router {
    Router::new()
        .route(
            "/api/certificates",
            get(certificates::list_certificates)
                .post(certificates::create_certificate)
                .fallback(not_found),
        )
        .route("/contact", post(contact::submit_contact).fallback(not_found))
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

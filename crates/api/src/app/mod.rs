//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store/mailer wiring and the operations behind each route
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and the JSON body extractor
//! - `errors.rs`: the single error-to-status mapping

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{AppServices, build_services};

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
///
/// Every response, including 404s and errors, carries permissive CORS headers.
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(Extension(services)).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(CorsLayer::permissive()),
    )
}

use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode};

use folio_core::Certificate;

use crate::app::dto::{CreateCertificateRequest, JsonBody};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub async fn list_certificates(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Certificate>>, ApiError> {
    let certificates = services.list_certificates().await.map_err(|e| {
        tracing::warn!(error = %e, "certificate listing failed");
        ApiError::ListCertificates(e)
    })?;

    Ok(Json(certificates))
}

pub async fn create_certificate(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<CreateCertificateRequest>,
) -> Result<(StatusCode, Json<Certificate>), ApiError> {
    let saved = services.create_certificate(body.into()).await.map_err(|e| {
        tracing::warn!(error = %e, "certificate not created");
        ApiError::CreateCertificate(e)
    })?;

    tracing::info!(id = %saved.id, "certificate created");
    Ok((StatusCode::CREATED, Json(saved)))
}

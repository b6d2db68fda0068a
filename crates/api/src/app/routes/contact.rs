use std::sync::Arc;

use axum::{Json, extract::Extension};

use crate::app::dto::{ContactRequest, ContactResponse, JsonBody};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// `POST /contact`: persist the message, then email it to the site owner.
///
/// Both failure stages produce the same response; the log line carries the
/// `stage` so operators can tell a lost message from an unsent one.
pub async fn submit_contact(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    match services.submit_contact(body.into()).await {
        Ok(saved) => {
            tracing::info!(id = %saved.id, "contact message saved and sent");
            Ok(Json(ContactResponse::sent()))
        }
        Err(err) => {
            tracing::error!(stage = err.stage(), error = %err, "contact submission failed");
            Err(ApiError::ContactFailed)
        }
    }
}

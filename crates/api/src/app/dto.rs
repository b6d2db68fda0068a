use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use folio_core::{CertificateDraft, ContactDraft};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/certificates`.
///
/// Fields stay raw JSON; the store decides how to cast them.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCertificateRequest {
    pub title: Option<Value>,
    pub issuer: Option<Value>,
    pub year: Option<Value>,
    pub description: Option<Value>,
}

impl From<CreateCertificateRequest> for CertificateDraft {
    fn from(body: CreateCertificateRequest) -> Self {
        Self {
            title: body.title,
            issuer: body.issuer,
            year: body.year,
            description: body.description,
        }
    }
}

/// Body of `POST /contact`.
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub message: Option<Value>,
}

impl From<ContactRequest> for ContactDraft {
    fn from(body: ContactRequest) -> Self {
        Self {
            name: body.name,
            email: body.email,
            message: body.message,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

impl ContactResponse {
    pub const SENT: &'static str = "Message saved and sent successfully";
    pub const FAILED: &'static str = "Message failed to send";

    pub fn sent() -> Self {
        Self {
            success: true,
            message: Self::SENT,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: Self::FAILED,
        }
    }
}

// -------------------------
// Body parsing
// -------------------------

/// JSON body extractor with the lenient policy of the public API.
///
/// - no JSON content type, or an empty body: every field absent
/// - JSON content type with a malformed body: 400 `{message}`
/// - a top-level array: every field absent
/// - a top-level scalar or `null`: 400 `{message}`, the handler never runs
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;

        parse_body(declared_json, &bytes).map(JsonBody)
    }
}

fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn parse_body<T>(declared_json: bool, bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if !declared_json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
    match value {
        Value::Object(map) => serde_json::from_value(Value::Object(map)).map_err(|e| ApiError::MalformedBody(e.to_string())),
        Value::Array(_) => Ok(T::default()),
        scalar => Err(ApiError::MalformedBody(format!(
            "JSON body must be an object or an array, got {scalar}"
        ))),
    }
}

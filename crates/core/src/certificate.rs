//! Certificate catalog entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Document;
use crate::error::{DomainError, DomainResult};
use crate::id::DocumentId;
use crate::value::{Numeric, RawField, cast_number, cast_text};

/// A certificate shown in the portfolio.
///
/// Every field except the id is optional; absent fields are omitted from the
/// serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Certificate fields as submitted, before casting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateDraft {
    pub title: RawField,
    pub issuer: RawField,
    pub year: RawField,
    pub description: RawField,
}

impl Document for Certificate {
    type Draft = CertificateDraft;

    const COLLECTION: &'static str = "certificates";
    const MODEL: &'static str = "Certificate";

    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn from_draft(id: DocumentId, _saved_at: DateTime<Utc>, draft: CertificateDraft) -> DomainResult<Self> {
        let mut errors = Vec::new();

        let title = cast_text("title", &draft.title).unwrap_or_else(|e| {
            errors.push(("title", e));
            None
        });
        let issuer = cast_text("issuer", &draft.issuer).unwrap_or_else(|e| {
            errors.push(("issuer", e));
            None
        });
        let year = cast_number("year", &draft.year).unwrap_or_else(|e| {
            errors.push(("year", e));
            None
        });
        let description = cast_text("description", &draft.description).unwrap_or_else(|e| {
            errors.push(("description", e));
            None
        });

        if let Some(err) = DomainError::from_field_errors(Self::MODEL, errors) {
            return Err(err);
        }

        Ok(Self {
            id,
            title,
            issuer,
            year,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(draft: CertificateDraft) -> DomainResult<Certificate> {
        Certificate::from_draft(DocumentId::new(), Utc::now(), draft)
    }

    #[test]
    fn full_draft_keeps_every_field() {
        let cert = build(CertificateDraft {
            title: Some(json!("AWS CCP")),
            issuer: Some(json!("Amazon")),
            year: Some(json!(2023)),
            description: Some(json!("Cloud fundamentals")),
        })
        .unwrap();

        assert_eq!(cert.title.as_deref(), Some("AWS CCP"));
        assert_eq!(cert.issuer.as_deref(), Some("Amazon"));
        assert_eq!(cert.year, Some(Numeric::from(2023)));
        assert_eq!(cert.description.as_deref(), Some("Cloud fundamentals"));
    }

    #[test]
    fn empty_draft_is_accepted() {
        let cert = build(CertificateDraft::default()).unwrap();
        let body = serde_json::to_value(&cert).unwrap();

        assert_eq!(body, json!({ "_id": cert.id.to_string() }));
    }

    #[test]
    fn uncastable_year_is_a_validation_error() {
        let err = build(CertificateDraft {
            title: Some(json!("AWS CCP")),
            year: Some(json!("abc")),
            ..Default::default()
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Certificate validation failed: year: Cast to Number failed for value \"abc\" (type string) at path \"year\""
        );
    }

    #[test]
    fn serializes_id_as_underscore_id() {
        let cert = build(CertificateDraft {
            title: Some(json!("CKA")),
            year: Some(json!(2022)),
            ..Default::default()
        })
        .unwrap();

        let body = serde_json::to_value(&cert).unwrap();
        assert_eq!(body["_id"], json!(cert.id.to_string()));
        assert_eq!(body["year"], json!(2022));
        assert!(body.get("issuer").is_none());
    }
}

//! MongoDB-backed document store.
//!
//! Documents are kept in the same shape the portfolio site has always used:
//! `_id` is an ObjectId, creation timestamps are BSON dates, every other field
//! is stored as serialized by the domain type.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Client, Database,
    bson::{self, Bson, DateTime as BsonDateTime, Document as BsonDocument, doc, oid::ObjectId},
    error::ErrorKind,
};

use folio_core::{Document, DocumentId};

use super::r#trait::{Collection, StoreError, StoreResult};

/// Database used when the connection string does not name one.
const DEFAULT_DATABASE: &str = "test";

/// Process-wide handle to a MongoDB database.
///
/// Cheap to clone; the driver shares its connection pool between clones.
#[derive(Clone, Debug)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Parse `uri` and build a client for it.
    ///
    /// The driver connects lazily, so this only fails for malformed connection
    /// strings (or unresolvable SRV records). Use [`MongoStore::ping`] to check
    /// reachability.
    pub async fn connect(uri: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        Ok(Self { db })
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(classify)
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    /// Typed view over the collection holding `D`.
    pub fn collection<D: Document>(&self) -> MongoCollection<D> {
        MongoCollection {
            inner: self.db.collection::<BsonDocument>(D::COLLECTION),
            _doc: PhantomData,
        }
    }
}

pub struct MongoCollection<D> {
    inner: mongodb::Collection<BsonDocument>,
    _doc: PhantomData<fn() -> D>,
}

#[async_trait::async_trait]
impl<D: Document> Collection<D> for MongoCollection<D> {
    async fn find(&self) -> StoreResult<Vec<D>> {
        let cursor = self.inner.find(doc! {}).await.map_err(classify)?;
        let raw: Vec<BsonDocument> = cursor.try_collect().await.map_err(classify)?;

        raw.into_iter().map(from_stored::<D>).collect()
    }

    async fn save(&self, draft: D::Draft) -> StoreResult<D> {
        let oid = ObjectId::new();
        let id: DocumentId = oid.to_hex().parse()?;
        let doc = D::from_draft(id, Utc::now(), draft)?;

        let stored = to_stored(&doc, oid)?;
        self.inner.insert_one(stored).await.map_err(classify)?;

        tracing::debug!(collection = D::COLLECTION, id = %doc.id(), "document inserted");
        Ok(doc)
    }
}

/// Encode a domain document into its stored BSON form.
fn to_stored<D: Document>(doc: &D, oid: ObjectId) -> StoreResult<BsonDocument> {
    let mut stored =
        bson::to_document(doc).map_err(|e| StoreError::Validation(format!("{} encode failed: {e}", D::MODEL)))?;

    stored.insert("_id", oid);

    if let Some(field) = D::TIMESTAMP_FIELD {
        if let Some(Bson::String(text)) = stored.get(field) {
            let at = DateTime::parse_from_rfc3339(text)
                .map_err(|e| StoreError::Validation(format!("{field}: {e}")))?;
            stored.insert(field, BsonDateTime::from_millis(at.timestamp_millis()));
        }
    }

    Ok(stored)
}

/// Decode a stored BSON document into the domain type.
fn from_stored<D: Document>(mut stored: BsonDocument) -> StoreResult<D> {
    if let Some(Bson::ObjectId(oid)) = stored.get("_id") {
        let hex = oid.to_hex();
        stored.insert("_id", hex);
    }

    if let Some(field) = D::TIMESTAMP_FIELD {
        if let Some(Bson::DateTime(at)) = stored.get(field) {
            let text = at
                .try_to_rfc3339_string()
                .map_err(|e| StoreError::Query(format!("{field}: {e}")))?;
            stored.insert(field, text);
        }
    }

    bson::from_document(stored).map_err(|e| StoreError::Query(format!("{} decode failed: {e}", D::MODEL)))
}

fn classify(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::DnsResolve { .. } | ErrorKind::Io(_) => {
            StoreError::Connection(err.to_string())
        }
        _ => StoreError::Query(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Certificate, CertificateDraft, ContactDraft, ContactMessage};
    use serde_json::json;

    #[test]
    fn certificate_round_trips_through_stored_form() {
        let oid = ObjectId::new();
        let cert = Certificate::from_draft(
            oid.to_hex().parse().unwrap(),
            Utc::now(),
            CertificateDraft {
                title: Some(json!("AWS CCP")),
                year: Some(json!(2023)),
                ..Default::default()
            },
        )
        .unwrap();

        let stored = to_stored(&cert, oid).unwrap();
        assert_eq!(stored.get("_id"), Some(&Bson::ObjectId(oid)));
        assert!(stored.get("issuer").is_none());

        let back: Certificate = from_stored(stored).unwrap();
        assert_eq!(back, cert);
    }

    #[test]
    fn message_timestamp_is_stored_as_bson_date() {
        let oid = ObjectId::new();
        let msg = ContactMessage::from_draft(
            oid.to_hex().parse().unwrap(),
            Utc::now(),
            ContactDraft {
                name: Some(json!("Ada")),
                ..Default::default()
            },
        )
        .unwrap();

        let stored = to_stored(&msg, oid).unwrap();
        assert!(matches!(stored.get("createdAt"), Some(Bson::DateTime(_))));

        let back: ContactMessage = from_stored(stored).unwrap();
        assert_eq!(back.id, msg.id);
        assert_eq!(back.created_at.timestamp_millis(), msg.created_at.timestamp_millis());
    }

    #[test]
    fn legacy_double_year_decodes() {
        let oid = ObjectId::new();
        let stored = doc! {
            "_id": oid,
            "title": "CKA",
            "year": 2022.0_f64,
            "__v": 0,
        };

        let cert: Certificate = from_stored(stored).unwrap();
        assert_eq!(cert.id.as_str(), oid.to_hex());
        assert_eq!(serde_json::to_value(&cert).unwrap()["year"], json!(2022));
    }
}

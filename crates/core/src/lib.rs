//! `folio-core`: domain building blocks for the portfolio backend.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! the two stored document kinds, their drafts, field casting and the contact
//! notification layout.

pub mod certificate;
pub mod contact;
pub mod entity;
pub mod error;
pub mod id;
pub mod value;

pub use certificate::{Certificate, CertificateDraft};
pub use contact::{ContactDraft, ContactMessage, Notification};
pub use entity::Document;
pub use error::{DomainError, DomainResult};
pub use id::DocumentId;
pub use value::{Numeric, RawField};

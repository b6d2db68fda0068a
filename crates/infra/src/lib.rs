//! Infrastructure layer: document store, mail relay, configuration.

pub mod config;
pub mod document_store;
pub mod mail;

//! Document store boundary.
//!
//! Handlers talk to typed [`Collection`]s without knowing which store backs
//! them: MongoDB in production, in-memory in tests/dev, or an always-failing
//! stand-in when the store could not be set up at boot.

pub mod in_memory;
pub mod mongo;
pub mod r#trait;
pub mod unavailable;

pub use in_memory::InMemoryCollection;
pub use mongo::{MongoCollection, MongoStore};
pub use r#trait::{Collection, StoreError, StoreResult};
pub use unavailable::UnavailableCollection;

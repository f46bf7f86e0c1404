//! Domain Tracker Core Library
//!
//! Provides the business logic for tracking personal domain registrations:
//! - Session context (who is signed in)
//! - Live, owner-scoped domain list
//! - Per-row view/edit/renew/delete and the add-row form
//! - Field schema and display formatters
//!
//! This library is platform-independent. Identity and persistence are abstracted
//! through traits so any front end can plug in its own backends.

pub mod error;
pub mod format;
pub mod schema;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use format::Rendered;
pub use schema::{FieldDef, FIELDS};
pub use services::{
    DomainCollectionView, EditorState, NewRecordForm, RowEditor, ServiceContext, SessionContext,
};
pub use traits::{DocumentStore, DomainQuery, IdentityProvider, InMemoryDocumentStore, Subscription};
pub use types::{DomainRecord, FieldKey, Identity, NewDomainRecord, RecordFields, RecordPatch};

//! Collaborator abstraction trait definition

mod document_store;
mod identity_provider;

pub use document_store::{
    DocumentStore, DomainQuery, InMemoryDocumentStore, Snapshot, SortDirection, Subscription,
    DOMAINS_COLLECTION,
};
pub use identity_provider::IdentityProvider;

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for the full add / edit / renew / delete flow against
//! `InMemoryDocumentStore`, as a front end drives it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use domain_tracker_core::error::{CoreError, CoreResult};
use domain_tracker_core::schema::FIELDS;
use domain_tracker_core::traits::{IdentityProvider, InMemoryDocumentStore};
use domain_tracker_core::types::{FieldKey, Identity};
use domain_tracker_core::utils::{Clock, FixedClock};
use domain_tracker_core::ServiceContext;
use tokio::sync::watch;

// ===== Helpers =====

/// Identity provider that signs in whoever was last configured.
struct StaticIdentityProvider {
    user: String,
    sender: watch::Sender<Option<Identity>>,
}

impl StaticIdentityProvider {
    fn new(user: &str) -> Self {
        Self {
            user: user.to_string(),
            sender: watch::channel(None).0,
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn sign_in(&self) -> CoreResult<Identity> {
        let identity = Identity::new(self.user.clone(), Some(self.user.to_uppercase()));
        self.sender.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> CoreResult<()> {
        self.sender.send_replace(None);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}

fn context(user: &str, store: &InMemoryDocumentStore) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::with_clock(
        Arc::new(StaticIdentityProvider::new(user)),
        Arc::new(store.clone()),
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())),
    ))
}

// ===== Tests =====

#[tokio::test]
async fn add_edit_renew_delete_round_trip() {
    let store = InMemoryDocumentStore::new();
    let ctx = context("alice", &store);
    ctx.session.sign_in().await.unwrap();

    let mut view = ctx.collection_view();
    view.sync_identity().await.unwrap();
    assert!(view.rows().is_empty());

    // Add
    let mut form = ctx.new_record_form();
    form.set_field(FieldKey::Name, "example.org").unwrap();
    form.set_field(FieldKey::FirstRegistered, "2019-04-02").unwrap();
    form.set_field(FieldKey::CurrentExpiry, "2024-03-15").unwrap();
    let id = form.submit().await.unwrap();

    assert!(view.refresh());
    assert_eq!(view.rows().len(), 1);
    let row = view.rows()[0].clone();
    assert_eq!(row.id, id);
    assert_eq!(row.owner, "alice");

    let expires_in: Vec<_> = FIELDS
        .iter()
        .filter(|f| f.key == FieldKey::ExpiresIn)
        .map(|f| f.render(&row, ctx.clock.now()))
        .collect();
    assert_eq!(expires_in[0].visible_text(), "Expires in 13 days");
    assert!(expires_in[0].is_warning());

    // Edit
    let mut editor = ctx.row_editor(row);
    editor.begin_edit().unwrap();
    editor
        .set_field(FieldKey::CurrentRegistrar, "https://registrar.example.net/account")
        .unwrap();
    editor.toggle_checkbox(FieldKey::Released).unwrap();
    editor.save().await.unwrap();

    view.changed().await.unwrap();
    let row = &view.rows()[0];
    assert_eq!(
        FIELDS[2].render(row, ctx.clock.now()).visible_text(),
        "registrar.example.net"
    );
    assert!(row.fields.is_released());

    // Renew
    assert_eq!(editor.renew().await.unwrap(), "2025-03-15");
    view.changed().await.unwrap();
    assert_eq!(
        view.rows()[0].fields.current_expiry.as_deref(),
        Some("2025-03-15")
    );
    assert_eq!(view.rows()[0].fields.name.as_deref(), Some("example.org"));

    // Delete
    editor.delete().await.unwrap();
    view.changed().await.unwrap();
    assert!(view.rows().is_empty());
    assert!(store.documents().await.is_empty());
}

#[tokio::test]
async fn users_never_see_each_others_rows() {
    let store = InMemoryDocumentStore::new();
    let alice = context("alice", &store);
    let bob = context("bob", &store);
    alice.session.sign_in().await.unwrap();
    bob.session.sign_in().await.unwrap();

    let mut alice_view = alice.collection_view();
    alice_view.sync_identity().await.unwrap();

    let mut bob_form = bob.new_record_form();
    bob_form.set_field(FieldKey::Name, "bob.example").unwrap();
    bob_form.submit().await.unwrap();

    assert!(!alice_view.refresh());
    assert!(alice_view.rows().is_empty());
    assert_eq!(store.documents().await.len(), 1);
}

#[tokio::test]
async fn sign_out_suspends_the_list_and_blocks_writes() {
    let store = InMemoryDocumentStore::new();
    let ctx = context("alice", &store);
    ctx.session.sign_in().await.unwrap();

    let mut view = ctx.collection_view();
    view.sync_identity().await.unwrap();
    assert_eq!(store.subscriber_count(), 1);

    ctx.session.sign_out().await.unwrap();
    view.sync_identity().await.unwrap();
    assert_eq!(store.subscriber_count(), 0);

    let mut form = ctx.new_record_form();
    form.set_field(FieldKey::Name, "late.example").unwrap();
    assert_eq!(form.submit().await, Err(CoreError::NotSignedIn));
    assert!(store.documents().await.is_empty());
}

//! Document store abstract Trait

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::types::{DomainRecord, FieldKey, NewDomainRecord, RecordPatch};

/// Name of the logical collection holding domain records
pub const DOMAINS_COLLECTION: &str = "domains";

/// Ordered result set delivered by a live query
pub type Snapshot = Arc<Vec<DomainRecord>>;

/// Sort direction of a live query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Live query against the `domains` collection: one owner, one sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainQuery {
    pub owner: String,
    pub order_by: FieldKey,
    pub direction: SortDirection,
}

impl DomainQuery {
    /// Records of `owner`, oldest registration first
    #[must_use]
    pub fn owned_by(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            order_by: FieldKey::FirstRegistered,
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn matches(&self, record: &DomainRecord) -> bool {
        record.owner == self.owner
    }

    /// Filter and order `records` the way a store evaluates this query.
    ///
    /// Records missing the sort key come first; ties are broken by id.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a DomainRecord>) -> Vec<DomainRecord> {
        let mut rows: Vec<DomainRecord> = records
            .into_iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| self.compare(a, b));
        rows
    }

    fn compare(&self, a: &DomainRecord, b: &DomainRecord) -> Ordering {
        let ord = a
            .value(self.order_by)
            .cmp(&b.value(self.order_by))
            .then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

type Canceller = Box<dyn FnOnce() + Send + Sync>;

/// Handle on a live query.
///
/// Holds the latest snapshot and is cancelled exactly once, either by
/// [`Subscription::cancel`] or when dropped.
pub struct Subscription {
    query: DomainQuery,
    receiver: watch::Receiver<Snapshot>,
    canceller: Option<Canceller>,
}

impl Subscription {
    pub fn new(
        query: DomainQuery,
        receiver: watch::Receiver<Snapshot>,
        canceller: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self {
            query,
            receiver,
            canceller: Some(Box::new(canceller)),
        }
    }

    #[must_use]
    pub fn query(&self) -> &DomainQuery {
        &self.query
    }

    /// Most recent snapshot, marking it as seen
    pub fn latest(&mut self) -> Snapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Whether a snapshot arrived since the last `latest`/`changed`
    #[must_use]
    pub fn has_changed(&self) -> bool {
        !self.is_cancelled() && self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next snapshot.
    ///
    /// # Errors
    /// `StoreError` once the subscription is cancelled or the store hung up
    pub async fn changed(&mut self) -> CoreResult<Snapshot> {
        if self.is_cancelled() {
            return Err(CoreError::StoreError("subscription cancelled".to_string()));
        }
        self.receiver
            .changed()
            .await
            .map_err(|_| CoreError::StoreError("subscription closed by store".to_string()))?;
        Ok(self.latest())
    }

    /// Stop receiving snapshots. Further calls are no-ops.
    pub fn cancel(&mut self) {
        if let Some(canceller) = self.canceller.take() {
            log::debug!("cancelling live query for owner {}", self.query.owner);
            canceller();
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.canceller.is_none()
    }

    /// Current snapshot followed by every later one, ending when cancelled.
    pub fn into_stream(self) -> impl Stream<Item = Snapshot> + Send {
        futures::stream::unfold((self, true), |(mut sub, first)| async move {
            if first {
                let snapshot = sub.latest();
                return Some((snapshot, (sub, false)));
            }
            match sub.changed().await {
                Ok(snapshot) => Some((snapshot, (sub, false))),
                Err(_) => None,
            }
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("query", &self.query)
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Document Store Trait, scoped to the `domains` collection
///
/// Platform implementation:
/// - Core: `InMemoryDocumentStore`
/// - TUI: `JsonDocumentStore` (JSON file in the config directory)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open a live query.
    ///
    /// The returned subscription already holds the current result set.
    async fn subscribe(&self, query: DomainQuery) -> CoreResult<Subscription>;

    /// Insert a record, returning the store-assigned id
    async fn create(&self, record: &NewDomainRecord) -> CoreResult<String>;

    /// Apply `patch` to the record `id`
    ///
    /// # Errors
    /// `RecordNotFound` when no such record exists
    async fn update(&self, id: &str, patch: &RecordPatch) -> CoreResult<()>;

    /// Remove the record `id`. Removing a missing record succeeds.
    async fn delete(&self, id: &str) -> CoreResult<()>;
}

struct Subscriber {
    query: DomainQuery,
    sender: watch::Sender<Snapshot>,
}

#[derive(Default)]
struct StoreInner {
    documents: RwLock<HashMap<String, DomainRecord>>,
    subscribers: Mutex<HashMap<u64, Subscriber>>,
    next_subscriber_id: AtomicU64,
}

impl StoreInner {
    fn subscribers(&self) -> MutexGuard<'_, HashMap<u64, Subscriber>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Push fresh snapshots to every subscriber whose result set changed.
    fn publish(&self, documents: &HashMap<String, DomainRecord>) {
        for subscriber in self.subscribers().values() {
            let rows = subscriber.query.apply(documents.values());
            subscriber.sender.send_if_modified(|current| {
                if current.as_slice() == rows.as_slice() {
                    false
                } else {
                    *current = Arc::new(rows);
                    true
                }
            });
        }
    }
}

/// In-memory document store
///
/// Default implementation, also the engine behind file-backed stores.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    inner: Arc<StoreInner>,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`
    #[must_use]
    pub fn with_documents(records: impl IntoIterator<Item = DomainRecord>) -> Self {
        let documents = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            inner: Arc::new(StoreInner {
                documents: RwLock::new(documents),
                ..StoreInner::default()
            }),
        }
    }

    /// Every stored record, ordered by id
    pub async fn documents(&self) -> Vec<DomainRecord> {
        let mut all: Vec<DomainRecord> =
            self.inner.documents.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Insert or replace a record under its own id, notifying subscribers.
    ///
    /// For seeding and imports; regular creates go through [`DocumentStore::create`].
    pub async fn insert(&self, record: DomainRecord) {
        let mut documents = self.inner.documents.write().await;
        documents.insert(record.id.clone(), record);
        self.inner.publish(&documents);
    }

    /// Number of live, uncancelled subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers().len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn subscribe(&self, query: DomainQuery) -> CoreResult<Subscription> {
        // Registering under the read lock keeps writes from slipping in between
        // the initial snapshot and the first publish.
        let documents = self.inner.documents.read().await;
        let (sender, receiver) = watch::channel(Arc::new(query.apply(documents.values())));
        let id = self
            .inner
            .next_subscriber_id
            .fetch_add(1, AtomicOrdering::Relaxed);
        self.inner.subscribers().insert(
            id,
            Subscriber {
                query: query.clone(),
                sender,
            },
        );
        drop(documents);

        let inner = Arc::downgrade(&self.inner);
        Ok(Subscription::new(query, receiver, move || {
            if let Some(inner) = inner.upgrade() {
                inner.subscribers().remove(&id);
            }
        }))
    }

    async fn create(&self, record: &NewDomainRecord) -> CoreResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let mut documents = self.inner.documents.write().await;
        documents.insert(id.clone(), record.clone().with_id(id.clone()));
        self.inner.publish(&documents);
        log::debug!("created {DOMAINS_COLLECTION}/{id}");
        Ok(id)
    }

    async fn update(&self, id: &str, patch: &RecordPatch) -> CoreResult<()> {
        let mut documents = self.inner.documents.write().await;
        let record = documents
            .get_mut(id)
            .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))?;
        patch.apply_to(&mut record.fields)?;
        self.inner.publish(&documents);
        log::debug!("updated {DOMAINS_COLLECTION}/{id}");
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        let mut documents = self.inner.documents.write().await;
        if documents.remove(id).is_some() {
            self.inner.publish(&documents);
            log::debug!("deleted {DOMAINS_COLLECTION}/{id}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordFields;
    use futures::StreamExt;

    fn registered(name: &str, first_registered: Option<&str>) -> RecordFields {
        RecordFields {
            name: Some(name.to_string()),
            first_registered: first_registered.map(str::to_string),
            ..RecordFields::default()
        }
    }

    #[test]
    fn query_filters_owner_and_orders_ascending() {
        let records = vec![
            DomainRecord::new("a", "alice", registered("late.com", Some("2021-01-01"))),
            DomainRecord::new("b", "bob", registered("bobs.com", Some("2010-01-01"))),
            DomainRecord::new("c", "alice", registered("early.com", Some("2015-06-01"))),
            DomainRecord::new("d", "alice", registered("undated.com", None)),
        ];
        let rows = DomainQuery::owned_by("alice").apply(&records);

        let names: Vec<_> = rows.iter().filter_map(|r| r.fields.name.as_deref()).collect();
        assert_eq!(names, vec!["undated.com", "early.com", "late.com"]);
        assert!(rows.iter().all(|r| r.owner == "alice"));
    }

    #[test]
    fn query_descending_reverses() {
        let records = vec![
            DomainRecord::new("a", "u", registered("x", Some("2020-01-01"))),
            DomainRecord::new("b", "u", registered("y", Some("2022-01-01"))),
        ];
        let mut query = DomainQuery::owned_by("u");
        query.direction = SortDirection::Desc;
        let ids: Vec<_> = query.apply(&records).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn subscription_starts_with_current_rows() {
        let store = InMemoryDocumentStore::with_documents(vec![DomainRecord::new(
            "a",
            "u",
            registered("x.com", Some("2020-01-01")),
        )]);
        let mut sub = store.subscribe(DomainQuery::owned_by("u")).await.unwrap();
        assert_eq!(sub.latest().len(), 1);
        assert!(!sub.has_changed());
    }

    #[tokio::test]
    async fn writes_push_snapshots() {
        let store = InMemoryDocumentStore::new();
        let mut sub = store.subscribe(DomainQuery::owned_by("u")).await.unwrap();

        let id = store
            .create(&NewDomainRecord::new("u", registered("x.com", None)))
            .await
            .unwrap();
        assert!(sub.has_changed());
        assert_eq!(sub.latest()[0].id, id);

        store
            .update(
                &id,
                &RecordPatch::SetField {
                    key: FieldKey::Purpose,
                    value: "mail".into(),
                },
            )
            .await
            .unwrap();
        let rows = sub.changed().await.unwrap();
        assert_eq!(rows[0].fields.purpose.as_deref(), Some("mail"));

        store.delete(&id).await.unwrap();
        assert!(sub.changed().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_owners_writes_do_not_notify() {
        let store = InMemoryDocumentStore::new();
        let sub = store.subscribe(DomainQuery::owned_by("alice")).await.unwrap();

        store
            .create(&NewDomainRecord::new("bob", registered("bob.com", None)))
            .await
            .unwrap();
        assert!(!sub.has_changed());
    }

    #[tokio::test]
    async fn update_missing_record_fails() {
        let store = InMemoryDocumentStore::new();
        let err = store
            .update(
                "nope",
                &RecordPatch::SetField {
                    key: FieldKey::Name,
                    value: "x".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::RecordNotFound("nope".into()));
    }

    #[tokio::test]
    async fn delete_missing_record_succeeds() {
        let store = InMemoryDocumentStore::new();
        assert!(store.delete("nope").await.is_ok());
    }

    #[tokio::test]
    async fn cancel_and_drop_release_subscriber_once() {
        let store = InMemoryDocumentStore::new();
        let mut first = store.subscribe(DomainQuery::owned_by("u")).await.unwrap();
        let second = store.subscribe(DomainQuery::owned_by("u")).await.unwrap();
        assert_eq!(store.subscriber_count(), 2);

        first.cancel();
        first.cancel();
        assert!(first.is_cancelled());
        assert_eq!(store.subscriber_count(), 1);
        assert!(first.changed().await.is_err());

        drop(second);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn stream_yields_current_then_changes() {
        let store = InMemoryDocumentStore::new();
        let sub = store.subscribe(DomainQuery::owned_by("u")).await.unwrap();
        let mut stream = Box::pin(sub.into_stream());

        assert!(stream.next().await.unwrap().is_empty());

        store
            .create(&NewDomainRecord::new("u", registered("x.com", None)))
            .await
            .unwrap();
        assert_eq!(stream.next().await.unwrap().len(), 1);

        drop(stream);
        assert_eq!(store.subscriber_count(), 0);
    }
}

//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::{watch, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{
    DocumentStore, DomainQuery, IdentityProvider, InMemoryDocumentStore, Subscription,
};
use crate::types::{DomainRecord, Identity, NewDomainRecord, RecordFields, RecordPatch};
use crate::utils::FixedClock;

// ===== MockDocumentStore =====

/// 一次到达存储层的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Subscribe { query: DomainQuery },
    Create { record: NewDomainRecord },
    Update { id: String, patch: RecordPatch },
    Delete { id: String },
}

/// 记录调用的内存存储
pub struct MockDocumentStore {
    inner: InMemoryDocumentStore,
    calls: RwLock<Vec<StoreCall>>,
    /// 如果 Some，下一次调用返回此错误
    fail_next: RwLock<Option<String>>,
}

impl MockDocumentStore {
    pub fn new(records: Vec<DomainRecord>) -> Self {
        Self {
            inner: InMemoryDocumentStore::with_documents(records),
            calls: RwLock::new(Vec::new()),
            fail_next: RwLock::new(None),
        }
    }

    pub async fn fail_next(&self, msg: &str) {
        *self.fail_next.write().await = Some(msg.to_string());
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.read().await.clone()
    }

    /// 除订阅以外的调用
    pub async fn writes(&self) -> Vec<StoreCall> {
        self.calls()
            .await
            .into_iter()
            .filter(|c| !matches!(c, StoreCall::Subscribe { .. }))
            .collect()
    }

    pub async fn subscribe_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, StoreCall::Subscribe { .. }))
            .count()
    }

    pub fn active_subscriptions(&self) -> usize {
        self.inner.subscriber_count()
    }

    pub async fn stored(&self, id: &str) -> Option<DomainRecord> {
        self.inner.documents().await.into_iter().find(|r| r.id == id)
    }

    /// 绕过调用记录直接写入（模拟其他客户端）
    pub async fn insert(&self, record: DomainRecord) {
        self.inner.insert(record).await;
    }

    /// 绕过调用记录直接删除（模拟其他客户端）
    pub async fn remove(&self, id: &str) {
        let _ = self.inner.delete(id).await;
    }

    async fn record(&self, call: StoreCall) -> CoreResult<()> {
        self.calls.write().await.push(call);
        match self.fail_next.write().await.take() {
            Some(msg) => Err(CoreError::StoreError(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn subscribe(&self, query: DomainQuery) -> CoreResult<Subscription> {
        self.record(StoreCall::Subscribe {
            query: query.clone(),
        })
        .await?;
        self.inner.subscribe(query).await
    }

    async fn create(&self, record: &NewDomainRecord) -> CoreResult<String> {
        self.record(StoreCall::Create {
            record: record.clone(),
        })
        .await?;
        self.inner.create(record).await
    }

    async fn update(&self, id: &str, patch: &RecordPatch) -> CoreResult<()> {
        self.record(StoreCall::Update {
            id: id.to_string(),
            patch: patch.clone(),
        })
        .await?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        self.record(StoreCall::Delete { id: id.to_string() }).await?;
        self.inner.delete(id).await
    }
}

// ===== MockIdentityProvider =====

pub struct MockIdentityProvider {
    user_id: Mutex<String>,
    /// 如果 Some，sign_in 返回此错误
    sign_in_error: RwLock<Option<String>>,
    sender: watch::Sender<Option<Identity>>,
}

impl MockIdentityProvider {
    pub fn new(user_id: &str) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            user_id: Mutex::new(user_id.to_string()),
            sign_in_error: RwLock::new(None),
            sender,
        }
    }

    /// 下一次 sign_in 使用的用户
    pub fn set_user(&self, user_id: &str) {
        *self.user_id.lock().unwrap_or_else(PoisonError::into_inner) = user_id.to_string();
    }

    pub async fn fail_sign_in(&self, msg: &str) {
        *self.sign_in_error.write().await = Some(msg.to_string());
    }

    /// 模拟会话过期
    pub fn expire(&self) {
        self.sender.send_replace(None);
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self) -> CoreResult<Identity> {
        if let Some(ref msg) = *self.sign_in_error.read().await {
            return Err(CoreError::AuthError(msg.clone()));
        }
        let id = self
            .user_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let identity = Identity::new(id, None);
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

// ===== 工厂方法 =====

/// 测试上下文：服务 + 可观察的 mock
pub struct TestHarness {
    pub ctx: Arc<ServiceContext>,
    pub store: Arc<MockDocumentStore>,
    pub identity: Arc<MockIdentityProvider>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// 时钟固定在 2024-01-01T00:00:00Z
    pub fn with_records(records: Vec<DomainRecord>) -> Self {
        let store = Arc::new(MockDocumentStore::new(records));
        let identity = Arc::new(MockIdentityProvider::new("nobody"));
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        let ctx = Arc::new(ServiceContext::with_clock(
            identity.clone(),
            store.clone(),
            clock,
        ));
        Self {
            ctx,
            store,
            identity,
        }
    }

    pub async fn sign_in(&self, user_id: &str) {
        self.identity.set_user(user_id);
        self.ctx.session.sign_in().await.unwrap();
    }

    pub async fn sign_out(&self) {
        self.ctx.session.sign_out().await.unwrap();
    }
}

/// 创建一条测试记录
pub fn record(id: &str, owner: &str, name: &str, first_registered: &str) -> DomainRecord {
    DomainRecord::new(
        id,
        owner,
        RecordFields {
            name: Some(name.to_string()),
            first_registered: Some(first_registered.to_string()),
            ..RecordFields::default()
        },
    )
}

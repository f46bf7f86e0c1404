//! 域名记录存储
//!
//! 实现 domain-tracker-core 的 `DocumentStore` trait
//! 数据存储在内存中，每次修改先整体写入 JSON 文件，成功后才更新内存并推送快照

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain_tracker_core::traits::{
    DocumentStore, DomainQuery, InMemoryDocumentStore, Subscription, DOMAINS_COLLECTION,
};
use domain_tracker_core::types::{DomainRecord, NewDomainRecord, RecordPatch};
use domain_tracker_core::{CoreError, CoreResult};
use tokio::fs;
use tokio::sync::Mutex;

/// 基于 JSON 文件的文档存储
pub struct JsonDocumentStore {
    inner: InMemoryDocumentStore,
    path: PathBuf,
    /// 串行化文件写入
    write_lock: Mutex<()>,
}

impl JsonDocumentStore {
    /// 打开存储文件，文件不存在时从空集合开始
    pub async fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let records = Self::load_from_file(&path).await?;
        log::info!("Loaded {} domain records from {}", records.len(), path.display());

        Ok(Self {
            inner: InMemoryDocumentStore::with_documents(records),
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// 默认位置的存储
    pub async fn open_default() -> CoreResult<Self> {
        Self::open(super::config_dir().join("domains.json")).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_from_file(path: &Path) -> CoreResult<Vec<DomainRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CoreError::StoreError(e.to_string()))?;

        let records: Vec<DomainRecord> = serde_json::from_str(&content)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        Ok(records)
    }

    /// 把 `records` 整体写入文件
    ///
    /// 调用方持有 `write_lock`，写入成功后才把变更提交到内存
    async fn save_to_file(&self, records: &[DomainRecord]) -> CoreResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| CoreError::StoreError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| CoreError::StoreError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonDocumentStore {
    async fn subscribe(&self, query: DomainQuery) -> CoreResult<Subscription> {
        self.inner.subscribe(query).await
    }

    async fn create(&self, record: &NewDomainRecord) -> CoreResult<String> {
        let _guard = self.write_lock.lock().await;

        let id = uuid::Uuid::new_v4().to_string();
        let created = record.clone().with_id(id.clone());
        let mut records = self.inner.documents().await;
        records.push(created.clone());
        records.sort_by(|a, b| a.id.cmp(&b.id));

        self.save_to_file(&records).await?;
        self.inner.insert(created).await;
        log::debug!("created {DOMAINS_COLLECTION}/{id}");
        Ok(id)
    }

    async fn update(&self, id: &str, patch: &RecordPatch) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.inner.documents().await;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))?;
        patch.apply_to(&mut record.fields)?;
        let updated = record.clone();

        self.save_to_file(&records).await?;
        self.inner.insert(updated).await;
        log::debug!("updated {DOMAINS_COLLECTION}/{id}");
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.inner.documents().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(());
        }

        self.save_to_file(&records).await?;
        self.inner.delete(id).await
    }
}

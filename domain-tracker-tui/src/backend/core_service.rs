//! 核心服务
//!
//! 封装 domain-tracker-core 的服务上下文，
//! 并持有驱动异步调用的 tokio 运行时

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use domain_tracker_core::services::ServiceContext;
use domain_tracker_core::traits::{DocumentStore, IdentityProvider};

use super::config_service::AppConfig;
use super::document_store::JsonDocumentStore;
use super::identity_provider::LocalIdentityProvider;

/// TUI 核心服务
///
/// 主循环是同步的，所有存储调用都经由 [`CoreService::block_on`] 执行
pub struct CoreService {
    runtime: tokio::runtime::Runtime,
    ctx: Arc<ServiceContext>,
}

impl CoreService {
    /// 按配置创建：JSON 文件存储 + 本地身份
    pub fn new(config: &AppConfig) -> Result<Self> {
        let runtime = Self::build_runtime()?;
        let store = runtime.block_on(JsonDocumentStore::open_default())?;
        log::info!("Domain records stored in {}", store.path().display());
        let identity = LocalIdentityProvider::new(config.user_name.clone());
        Ok(Self::assemble(runtime, Arc::new(identity), Arc::new(store)))
    }

    /// 使用指定的身份与存储实现创建
    #[cfg(test)]
    pub fn with_backends(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self> {
        Ok(Self::assemble(Self::build_runtime()?, identity, store))
    }

    fn build_runtime() -> Result<tokio::runtime::Runtime> {
        Ok(tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?)
    }

    fn assemble(
        runtime: tokio::runtime::Runtime,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            runtime,
            ctx: Arc::new(ServiceContext::new(identity, store)),
        }
    }

    /// 服务上下文
    pub fn ctx(&self) -> &Arc<ServiceContext> {
        &self.ctx
    }

    /// 在内部运行时上等待一个异步调用完成
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

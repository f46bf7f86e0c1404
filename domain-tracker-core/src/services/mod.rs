//! 业务逻辑服务层

mod collection_view;
mod new_record_form;
mod row_editor;
mod session;

pub use collection_view::DomainCollectionView;
pub use new_record_form::NewRecordForm;
pub use row_editor::{EditorState, RowEditor};
pub use session::SessionContext;

use std::sync::Arc;

use crate::error::CoreResult;
use crate::traits::{DocumentStore, IdentityProvider};
use crate::types::{DomainRecord, Identity};
use crate::utils::{Clock, SystemClock};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的身份与存储实现。
pub struct ServiceContext {
    /// 当前会话
    pub session: SessionContext,
    /// 文档存储
    pub document_store: Arc<dyn DocumentStore>,
    /// 时间来源（用于到期倒计时）
    pub clock: Arc<dyn Clock>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        document_store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self::with_clock(identity_provider, document_store, Arc::new(SystemClock))
    }

    /// 创建服务上下文（指定时间来源）
    #[must_use]
    pub fn with_clock(
        identity_provider: Arc<dyn IdentityProvider>,
        document_store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session: SessionContext::new(identity_provider),
            document_store,
            clock,
        }
    }

    /// 当前登录身份，未登录时返回 `NotSignedIn`
    pub fn require_identity(&self) -> CoreResult<Identity> {
        self.session.require()
    }

    /// 创建域名列表视图
    #[must_use]
    pub fn collection_view(self: &Arc<Self>) -> DomainCollectionView {
        DomainCollectionView::new(self.clone())
    }

    /// 为一行记录创建编辑器
    #[must_use]
    pub fn row_editor(self: &Arc<Self>, record: DomainRecord) -> RowEditor {
        RowEditor::new(self.clone(), record)
    }

    /// 创建新记录表单
    #[must_use]
    pub fn new_record_form(self: &Arc<Self>) -> NewRecordForm {
        NewRecordForm::new(self.clone())
    }
}

//! 应用主状态结构

use domain_tracker_core::types::Identity;

use super::{DomainsState, FocusPanel, ModalState};
use crate::backend::{AppConfig, ConfigService, CoreService};

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 当前焦点面板
    pub focus: FocusPanel,

    /// 状态栏消息
    pub status_message: Option<String>,

    /// 核心服务
    pub core: CoreService,

    /// 当前配置
    pub config: AppConfig,

    /// 配置持久化
    pub config_service: Box<dyn ConfigService>,

    /// 域名页面状态
    pub domains: DomainsState,

    /// 弹窗状态
    pub modal: ModalState,
}

impl App {
    /// 创建新的应用实例
    pub fn new(core: CoreService, config: AppConfig, config_service: Box<dyn ConfigService>) -> Self {
        config.theme.apply();
        let domains = DomainsState::new(core.ctx().clone(), config.clear_form_on_create);
        Self {
            should_quit: false,
            focus: FocusPanel::default(),
            status_message: None,
            core,
            config,
            config_service,
            domains,
            modal: ModalState::new(),
        }
    }

    /// 当前登录身份
    pub fn identity(&self) -> Option<Identity> {
        self.core.ctx().session.current()
    }

    /// 设置状态消息
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// 清除状态消息
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

//!
//! src/backend/mod.rs
//! Backend 层：业务服务
//!
//! Backend 层与 UI 完全解耦，负责所有的业务逻辑。
//! 通过 domain-tracker-core 库实现域名记录的增删改查与实时列表。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod core_service;           // 核心服务入口（运行时 + ServiceContext）
//!         mod document_store;         // 域名记录存储（JSON 文件）
//!         mod identity_provider;      // 本地身份提供者
//!         mod config_service;         // 配置服务（JSON 文件）
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、核心服务（CoreService）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     CoreService 是 Backend 层的入口，封装了 domain-tracker-core 库。
//!
//!         创建流程：
//!             1. 创建 tokio 运行时（单线程）
//!             2. 打开 JsonDocumentStore（读取 domains.json）
//!             3. 创建 LocalIdentityProvider（配置中的用户名或系统用户名）
//!             4. 组装 ServiceContext
//!
//!         UI 层通过 ctx() 创建列表视图、行编辑器与新建表单，
//!         并通过 block_on() 等待它们的异步调用。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、数据流
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     用户按 Enter 保存一行
//!         ↓
//!     Update 层处理 ContentMessage::Confirm
//!         ↓
//!     core.block_on(editor.save())
//!         ↓
//!     JsonDocumentStore 更新内存并写回文件，推送新快照
//!         ↓
//!     下一轮主循环 tick：列表视图 refresh() 取到新快照
//!         ↓
//!     View 层重新渲染
//!

use std::path::PathBuf;

mod config_service;
mod core_service;
mod document_store;
mod identity_provider;

pub use config_service::{AppConfig, ConfigService, LocalConfigService};
pub use core_service::CoreService;
#[cfg(test)]
pub use identity_provider::LocalIdentityProvider;

/// 获取配置目录路径
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("domain-tracker-tui")
}

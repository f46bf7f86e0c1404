//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态。
//! 是唯一可以修改 Model 的地方。
//!
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod content;            // 表格 / 新建表单子消息处理
//!         mod modal;              // 弹窗子消息处理
//!
//!         pub fn update(app: &mut App, msg: AppMessage) {...}
//!         pub fn tick(app: &mut App) {...}
//!
//!
//!         update() 使用 match 穷举 AppMessage，
//!         复杂的子消息委托给子模块处理（content、modal）。
//!
//!         tick() 每轮主循环调用一次：
//!             1. 列表视图跟随当前登录身份（必要时重新订阅）
//!             2. 取最新快照
//!             3. 行编辑器与快照同步
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 错误展示
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     CoreError::is_expected() 为 true 的错误（未登录、校验失败等）
//!     只写到状态栏；其余错误（存储、认证失败）弹出错误弹窗。
//!
//!
//! Update 完成后，控制权返回主循环（app.rs）。
//! 下一轮循环时，View 层会读取更新后的 Model 来重新渲染。
//!

mod content;
mod modal;

use domain_tracker_core::CoreError;

use crate::message::AppMessage;
use crate::model::App;

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::ToggleFocus => {
            // 如果有弹窗打开，不切换焦点
            if !app.modal.is_open() {
                app.focus = app.focus.toggle();
            }
        }

        AppMessage::Content(content_msg) => {
            content::update(app, content_msg);
        }

        AppMessage::Modal(modal_msg) => {
            modal::update(app, modal_msg);
        }

        AppMessage::SignIn => {
            let result = app.core.block_on(app.core.ctx().session.sign_in());
            match result {
                Ok(identity) => app.set_status(format!("Signed in as {}", identity.label())),
                Err(e) => report(app, "Sign in", &e),
            }
            tick(app);
        }

        AppMessage::SignOut => {
            let result = app.core.block_on(app.core.ctx().session.sign_out());
            match result {
                Ok(()) => app.set_status("Signed out"),
                Err(e) => report(app, "Sign out", &e),
            }
            tick(app);
        }

        AppMessage::ToggleTheme => {
            app.config.theme = app.config.theme.toggle();
            app.config.theme.apply();
            if let Err(e) = app.config_service.save(&app.config) {
                log::error!("Failed to save config: {e:#}");
                app.modal.show_error("Save settings", &format!("{e:#}"));
            }
        }

        AppMessage::ShowHelp => {
            app.modal.show_help();
        }

        AppMessage::ClearStatus => {
            app.clear_status();
        }

        AppMessage::Noop => {}
    }
}

/// 每轮主循环调用：跟随身份、取最新快照、同步行编辑器
pub fn tick(app: &mut App) {
    let result = app.core.block_on(app.domains.view.sync_identity());
    if let Err(e) = result {
        report(app, "Load domains", &e);
    }
    app.domains.view.refresh();
    app.domains.sync_rows();
}

/// 展示一次失败的操作
fn report(app: &mut App, action: &str, error: &CoreError) {
    if error.is_expected() {
        app.set_status(format!("{action}: {error}"));
    } else {
        app.modal.show_error(action, &error.to_string());
    }
}

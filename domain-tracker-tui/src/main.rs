//! Domain Tracker TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 业务服务 (`backend/`)
//!
//!
//! main.rs
//! Domain Tracker TUI 的程序入口
//!
//! 其执行：
//! fn `main()` {
//!
//!     LocalConfigService::load()  // 读取配置（主题、用户名等）
//!     init_logging()              // 日志写入配置目录下的 tui.log
//!     CoreService::new()          // 打开记录存储，组装 ServiceContext
//!     model::App::new()           // 创建 APP 实例
//!     init_terminal()             // 原始模式 + 备用屏幕
//!     app::run()                  // 运行 app.rs 主循环
//!     restore_terminal()          // 无论成功与否，都恢复终端
//!
//! }
//!
//!
//! 终端初始化放在最后：之前的任何失败都还能正常打印到 stderr。

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use anyhow::Result;

use backend::{ConfigService, CoreService, LocalConfigService};
use util::{init_logging, init_terminal, restore_terminal};

fn main() -> Result<(), anyhow::Error> {
    // 1. 读取配置
    let config_service = LocalConfigService::new();
    let config = config_service.load()?;

    // 2. 初始化日志
    let log_path = init_logging(&backend::config_dir())?;
    log::info!("Domain Tracker TUI starting, log file {}", log_path.display());
    log::info!("Config file {}", config_service.path().display());

    // 3. 创建核心服务与应用实例
    let core = CoreService::new(&config)?;
    let mut app = model::App::new(core, config, Box::new(config_service));

    // 4. 初始化终端
    let mut terminal = init_terminal()?;

    // 5. 运行主循环
    let result = app::run(&mut terminal, &mut app);

    // 6. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        log::error!("TUI exited with error: {e:#}");
    }
    result
}

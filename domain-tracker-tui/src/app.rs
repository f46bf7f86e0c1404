//!
//! app.rs
//! 应用主循环
//!
//!
//!
//! 在应用启动时，App 的初始状态为：
//!
//! App {
//!
//!     should_quit: bool = false,                      // 决定应用是否应该退出
//!     focus: FocusPanel::Table,                       // 焦点在域名表格
//!     status_message = None,                          // 状态栏消息
//!     domains: DomainsState {                         // 尚未登录，列表为空，没有订阅
//!         view, editors: {}, selected: 0, form, ...
//!     },
//!     modal: ModalState { active: None },
//!
//! }
//!
//!
//! 主循环大约每 100 ms 执行一次（取决于有无事件）
//! 应用的主循环中有：
//! loop {
//!
//!     terminal.draw(|f| view::render(&app , f))       // 渲染 UI
//!     if app.should_quit{ break }                     // 检查 APP 是否应该退出
//!     if let Some(event) = poll_event() {             // 轮询获取输入，在此等待 100ms
//!         let msg = handle_event(event , &app);           // 接收原始事件并分发消息
//!         update::update(&mut app , msg)                  // 更新终端状态
//!     }
//!     update::tick(&mut app)                          // 跟随登录身份，取最新快照
//! }
//!
//! 存储推送的新快照不会打断 poll_event，
//! 最迟在下一次 tick 时被取到，即最多延迟一个轮询周期。

use std::time::Duration;

use anyhow::Result;

use crate::event;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

/// 事件轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 运行应用主循环
pub fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
    // 首帧之前先同步一次
    update::tick(app);

    loop {
        // 1. 渲染 UI
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 2. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 3. 轮询事件（100ms 超时）
        if let Some(event) = event::poll_event(POLL_INTERVAL)? {
            // 4. 处理事件，获取消息
            let msg = event::handle_event(event, app);

            // 5. 更新状态
            update::update(app, msg);
        }

        // 6. 取最新快照
        update::tick(app);
    }

    log::info!("Domain Tracker TUI exiting");
    Ok(())
}

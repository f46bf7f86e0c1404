//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘输入事件转换为 Message。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件处理器
//!         mod keymap;         // 快捷键映射
//!
//!         pub use handler::{handle_event, poll_event};
//!
//!
//!     其中有：
//!         · poll_event      事件轮询，受 app.rs 调用，最长等待 timeout
//!
//!         · handle_event    将原始事件翻译为 AppMessage
//!
//!             按优先级分发：
//!                 1. 弹窗打开时，只响应关闭按键
//!                 2. 全局快捷键（退出、帮助、登录/退出登录、切换主题、Tab 切换面板）
//!                 3. 焦点在新建表单：文本输入、←→ 切换列、Enter 提交
//!                 4. 焦点在表格且选中行处于编辑：文本输入、Enter 保存、Esc 放弃
//!                 5. 焦点在表格：↑↓ 选择、Enter 编辑、Alt+r 续期、Alt+d 删除
//!
//!             输入状态下裸字母键都是文本，所以行操作统一使用 Alt 组合键。
//!
//!
//! 最后，Event 将 AppMessage 交给 Update 层。
//!     去往 src/message/mod.rs 看看消息的定义吧
//!

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};

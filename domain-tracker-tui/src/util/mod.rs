//!
//! src/util/mod.rs
//! Util 层：基础设施和工具函数
//!
//! Util 层提供与业务逻辑无关的基础设施代码，
//! 负责终端的初始化和恢复，以及日志的初始化。
//!
//!
//! 有模块结构：
//!     src/util/mod.rs
//!         mod logging;        // 文件日志
//!         mod terminal;       // 终端初始化和恢复
//!
//!         pub use logging::init_logging;
//!         pub use terminal::{init_terminal, restore_terminal, Term};
//!
//!
//!     初始化终端：
//!
//!         · Raw Mode（原始模式）
//!             - 关闭行缓冲：无需按 Enter，每个按键立即生效
//!             - 关闭字符回显：按键不会显示在终端上
//!             - 捕获所有按键：包括 Ctrl+C、箭头键等特殊键
//!
//!         · Alternate Screen（备用屏幕）
//!             - TUI 应用在备用屏幕运行
//!             - 退出后自动恢复主屏幕内容
//!
//!         · Panic Hook
//!             - panic 时先离开原始模式与备用屏幕，panic 信息才能正常显示
//!
//!
//!     恢复终端：
//!         无论 app::run 正常退出还是返回错误，main.rs 都会先调用 restore_terminal，
//!         再返回结果。
//!
//!
//!     日志：
//!         终端被 TUI 占用，日志只能写文件（见 logging.rs）。
//!         init_logging 在终端初始化之前调用，失败时错误还能打印到 stderr。
//!
//!
//! Util 层在应用启动时初始化终端，在应用退出时恢复终端。
//!     去往 src/app.rs 主循环吧
//!

mod logging;
mod terminal;

pub use logging::init_logging;
pub use terminal::{init_terminal, restore_terminal, Term};

//!
//! src/model/mod.rs
//! Model 层：应用状态定义
//!
//! Model 层是应用状态的 “唯一真相来源”。
//! 所有状态变更都通过 Update 层来触发。
//!
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // 主应用状态
//!         mod focus;          // 焦点状态（Table / Form）
//!
//!         pub mod state;      // 页面数据状态（域名表格、弹窗）
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、主应用状态（App）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/model/app.rs 中定义：
//!
//!         pub struct App {
//!             pub should_quit: bool,              // 退出标志
//!             pub focus: FocusPanel,              // 当前焦点
//!             pub status_message: Option<String>, // 状态栏消息（可选）
//!             pub core: CoreService,              // 核心服务（运行时 + ServiceContext）
//!             pub config: AppConfig,              // 当前配置
//!             pub domains: DomainsState,          // 域名表格状态
//!             pub modal: ModalState,              // 弹窗状态
//!             ...
//!         }
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、域名表格状态（DomainsState）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/model/state/domains.rs 中定义：
//!
//!         DomainsState {
//!             view: DomainCollectionView,             // 实时列表（只含当前用户的记录）
//!             editors: HashMap<String, RowEditor>,    // 每行一个编辑器
//!             selected: usize,                        // 选中行位置
//!             selected_id: Option<String>,            // 选中的记录，排序变化时跟随
//!             column: usize,                          // 编辑中的列
//!             form: NewRecordForm,                    // 底部新建表单
//!             form_column: usize,                     // 表单当前列
//!         }
//!
//!     数据流：
//!         主循环每轮 tick
//!             ↓
//!         view.sync_identity()  跟随登录身份切换订阅
//!         view.refresh()        取最新快照
//!             ↓
//!         sync_rows()           为新行创建编辑器，移除已消失的行，按 id 找回选中行
//!             ↓
//!         view 层按字段表渲染每一行
//!
//!
//! Model 层的数据被 Update 层修改，然后被 View 层读取并渲染成 UI。
//!

mod app;
mod focus;
pub mod state;

pub use app::App;
pub use focus::FocusPanel;
pub use state::{DomainsState, Modal, ModalState};

//!
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! View 层只读取 Model，从不修改它。
//!
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         mod layout;         // 主布局：标题栏 + 域名表格 + 新建表单 + 状态栏
//!         pub mod theme;      // 主题与样式
//!         mod components;     // 状态栏、弹窗
//!         mod pages;          // 域名表格与新建表单
//!
//!
//!     表格的列、表头与新建表单的输入框都遍历同一个 schema::FIELDS，
//!     列宽直接取 layout_weight（十分之一为单位）作为 Constraint::Fill，保证三者对齐。
//!

mod components;
mod layout;
mod pages;
pub mod theme;

pub use layout::render;

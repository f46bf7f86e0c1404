//! 页面状态模块
//!
//! 定义域名页面与弹窗的状态数据结构

mod domains;
mod modal;

pub use domains::{step_column, DomainsState};
pub use modal::{Modal, ModalState};

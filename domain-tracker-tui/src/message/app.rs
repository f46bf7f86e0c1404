//! 应用主消息枚举

use super::{ContentMessage, ModalMessage};

/// 应用主消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 在表格与新建表单之间切换焦点
    ToggleFocus,

    /// 内容面板相关消息
    Content(ContentMessage),

    /// 弹窗相关消息
    Modal(ModalMessage),

    /// 登录
    SignIn,

    /// 退出登录
    SignOut,

    /// 切换主题
    ToggleTheme,

    /// 显示帮助
    ShowHelp,

    /// 清除状态消息
    ClearStatus,

    /// 无操作（用于忽略未处理的事件）
    Noop,
}

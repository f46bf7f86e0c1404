//! 焦点状态定义

/// 焦点面板枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPanel {
    /// 域名表格
    #[default]
    Table,
    /// 底部新建表单
    Form,
}

impl FocusPanel {
    /// 切换到另一个面板
    pub fn toggle(self) -> Self {
        match self {
            FocusPanel::Table => FocusPanel::Form,
            FocusPanel::Form => FocusPanel::Table,
        }
    }

    /// 是否是表格
    pub fn is_table(self) -> bool {
        matches!(self, FocusPanel::Table)
    }

    /// 是否是新建表单
    pub fn is_form(self) -> bool {
        matches!(self, FocusPanel::Form)
    }
}

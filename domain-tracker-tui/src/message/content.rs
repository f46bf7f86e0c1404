//! 内容面板消息
//!
//! 表格与新建表单中的操作。输入类消息作用于当前焦点所在的面板。

/// 内容面板消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMessage {
    // ========== 列表导航 ==========
    /// 选择上一项
    SelectPrevious,
    /// 选择下一项
    SelectNext,
    /// 跳转到第一项
    SelectFirst,
    /// 跳转到最后一项
    SelectLast,

    // ========== 输入 ==========
    /// 上一列
    PrevColumn,
    /// 下一列
    NextColumn,
    /// 输入字符（复选框列上的空格为切换）
    Input(char),
    /// 删除字符（Backspace）
    Backspace,

    // ========== 行操作 ==========
    /// 开始编辑选中行
    Edit,
    /// 保存编辑 / 提交新建表单
    Confirm,
    /// 放弃编辑
    Cancel,
    /// 续期一年
    Renew,
    /// 删除选中行
    Delete,

    /// 清空新建表单
    ClearForm,
}

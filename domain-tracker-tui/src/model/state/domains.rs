//! 域名页面状态

use std::collections::HashMap;
use std::sync::Arc;

use domain_tracker_core::schema::{self, FieldDef};
use domain_tracker_core::services::{DomainCollectionView, NewRecordForm, RowEditor, ServiceContext};
use domain_tracker_core::types::DomainRecord;

/// 域名页面状态
///
/// 每一行都有自己的 `RowEditor`，随快照创建、同步和移除
pub struct DomainsState {
    /// 实时列表
    pub view: DomainCollectionView,
    /// 行编辑器（按记录 id）
    pub editors: HashMap<String, RowEditor>,
    /// 当前选中行的位置，由 `selected_id` 推出
    selected: usize,
    /// 当前选中的记录，快照重新排序后选择仍跟随它
    selected_id: Option<String>,
    /// 编辑中的列（可编辑列中的序号）
    pub column: usize,
    /// 新建表单
    pub form: NewRecordForm,
    /// 新建表单当前列
    pub form_column: usize,
    ctx: Arc<ServiceContext>,
}

impl DomainsState {
    /// 创建新的域名状态
    pub fn new(ctx: Arc<ServiceContext>, clear_form_on_create: bool) -> Self {
        Self {
            view: ctx.collection_view(),
            editors: HashMap::new(),
            selected: 0,
            selected_id: None,
            column: 0,
            form: ctx
                .new_record_form()
                .with_clear_on_create(clear_form_on_create),
            form_column: 0,
            ctx,
        }
    }

    /// 当前行
    pub fn rows(&self) -> &[DomainRecord] {
        self.view.rows()
    }

    /// 让编辑器与最新快照一致
    pub fn sync_rows(&mut self) {
        let rows = self.view.snapshot();
        self.editors
            .retain(|id, _| rows.iter().any(|record| &record.id == id));
        for record in rows.iter() {
            match self.editors.get_mut(&record.id) {
                Some(editor) => editor.sync_record(record.clone()),
                None => {
                    self.editors
                        .insert(record.id.clone(), self.ctx.row_editor(record.clone()));
                }
            }
        }

        // 选中的记录还在就跟随它，被删除时停在原位置
        let position = self
            .selected_id
            .as_ref()
            .and_then(|id| rows.iter().position(|record| &record.id == id));
        self.selected = position.unwrap_or_else(|| self.selected.min(rows.len().saturating_sub(1)));
        self.selected_id = rows.get(self.selected).map(|record| record.id.clone());
    }

    /// 当前选中行的位置
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 按位置选中一行
    fn select_index(&mut self, index: usize) {
        self.selected = index;
        self.selected_id = self.rows().get(index).map(|record| record.id.clone());
    }

    /// 选择上一项
    pub fn select_previous(&mut self) {
        self.select_index(self.selected.saturating_sub(1));
    }

    /// 选择下一项
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows().len() {
            self.select_index(self.selected + 1);
        }
    }

    /// 选择第一项
    pub fn select_first(&mut self) {
        self.select_index(0);
    }

    /// 选择最后一项
    pub fn select_last(&mut self) {
        self.select_index(self.rows().len().saturating_sub(1));
    }

    /// 获取当前选中行的编辑器
    pub fn selected_editor(&self) -> Option<&RowEditor> {
        self.editors.get(self.selected_id.as_ref()?)
    }

    pub fn selected_editor_mut(&mut self) -> Option<&mut RowEditor> {
        self.editors.get_mut(self.selected_id.as_ref()?)
    }

    /// 选中行是否处于编辑状态
    pub fn is_editing_selected(&self) -> bool {
        self.selected_editor().is_some_and(RowEditor::is_editing)
    }

    /// 编辑器中当前列的定义
    pub fn current_column(&self) -> &'static FieldDef {
        editable_column(self.column)
    }

    /// 新建表单中当前列的定义
    pub fn current_form_column(&self) -> &'static FieldDef {
        editable_column(self.form_column)
    }
}

/// 可编辑列的数量
pub fn editable_column_count() -> usize {
    schema::editable_fields().count()
}

/// 第 `index` 个可编辑列（越界时回到第一列）
pub fn editable_column(index: usize) -> &'static FieldDef {
    schema::editable_fields()
        .nth(index)
        .unwrap_or(&schema::FIELDS[0])
}

/// 在可编辑列之间循环移动
pub fn step_column(index: usize, forward: bool) -> usize {
    let count = editable_column_count();
    if forward {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_tracker_core::types::FieldKey;

    #[test]
    fn column_stepping_wraps_and_skips_read_only() {
        let count = editable_column_count();
        assert_eq!(step_column(count - 1, true), 0);
        assert_eq!(step_column(0, false), count - 1);
        assert!((0..count).all(|i| editable_column(i).key != FieldKey::ExpiresIn));
    }
}

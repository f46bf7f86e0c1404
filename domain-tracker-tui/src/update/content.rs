//! 内容面板消息处理
//!
//! 输入类消息作用于焦点所在的面板：表格中为选中行的编辑器，
//! 表单中为新建表单。

use domain_tracker_core::schema::InputKind;
use domain_tracker_core::types::FieldKey;

use super::{report, tick};
use crate::message::ContentMessage;
use crate::model::state::step_column;
use crate::model::App;

/// 处理内容面板消息
pub fn update(app: &mut App, msg: ContentMessage) {
    match msg {
        ContentMessage::SelectPrevious => app.domains.select_previous(),
        ContentMessage::SelectNext => app.domains.select_next(),
        ContentMessage::SelectFirst => app.domains.select_first(),
        ContentMessage::SelectLast => app.domains.select_last(),

        ContentMessage::PrevColumn | ContentMessage::NextColumn => {
            let forward = msg == ContentMessage::NextColumn;
            if app.focus.is_form() {
                app.domains.form_column = step_column(app.domains.form_column, forward);
            } else {
                app.domains.column = step_column(app.domains.column, forward);
            }
        }

        ContentMessage::Input(ch) => handle_input(app, Some(ch)),
        ContentMessage::Backspace => handle_input(app, None),

        ContentMessage::Edit => {
            let Some(editor) = app.domains.selected_editor_mut() else {
                return;
            };
            match editor.begin_edit() {
                Ok(()) => {
                    app.domains.column = 0;
                    app.clear_status();
                }
                Err(e) => report(app, "Edit", &e),
            }
        }

        ContentMessage::Confirm => {
            if app.focus.is_form() {
                submit_form(app);
            } else {
                save_row(app);
            }
        }

        ContentMessage::Cancel => {
            if let Some(editor) = app.domains.selected_editor_mut() {
                editor.cancel();
            }
        }

        ContentMessage::Renew => {
            let Some(editor) = app.domains.selected_editor_mut() else {
                return;
            };
            let result = app.core.block_on(editor.renew());
            match result {
                Ok(expiry) => app.set_status(format!("Renewed until {expiry}")),
                Err(e) => report(app, "Renew", &e),
            }
            tick(app);
        }

        ContentMessage::Delete => {
            let Some(editor) = app.domains.selected_editor() else {
                return;
            };
            let name = editor
                .record()
                .value(FieldKey::Name)
                .unwrap_or_default()
                .to_string();
            let result = app.core.block_on(editor.delete());
            match result {
                Ok(()) => app.set_status(format!("Deleted {name}")),
                Err(e) => report(app, "Delete", &e),
            }
            tick(app);
        }

        ContentMessage::ClearForm => {
            app.domains.form.reset();
            app.domains.form_column = 0;
        }
    }
}

/// 向当前列输入一个字符，`None` 表示退格
///
/// 复选框列只响应空格，用于切换勾选
fn handle_input(app: &mut App, ch: Option<char>) {
    let in_form = app.focus.is_form();
    let def = if in_form {
        app.domains.current_form_column()
    } else {
        app.domains.current_column()
    };

    let result = if in_form {
        let form = &mut app.domains.form;
        if def.input_kind == InputKind::Checkbox {
            match ch {
                Some(' ') => form.toggle_checkbox(def.key),
                _ => Ok(()),
            }
        } else {
            let value = edited(form.value(def.key).unwrap_or_default(), ch);
            form.set_field(def.key, value)
        }
    } else {
        let Some(editor) = app
            .domains
            .selected_editor_mut()
            .filter(|editor| editor.is_editing())
        else {
            return;
        };
        if def.input_kind == InputKind::Checkbox {
            match ch {
                Some(' ') => editor.toggle_checkbox(def.key),
                _ => Ok(()),
            }
        } else {
            let current = editor
                .working()
                .and_then(|working| working.get(def.key))
                .unwrap_or_default();
            let value = edited(current, ch);
            editor.set_field(def.key, value)
        }
    };

    if let Err(e) = result {
        report(app, "Input", &e);
    }
}

/// 追加或删除末尾字符后的新值
fn edited(current: &str, ch: Option<char>) -> String {
    let mut value = current.to_string();
    match ch {
        Some(ch) => value.push(ch),
        None => {
            value.pop();
        }
    }
    value
}

fn save_row(app: &mut App) {
    let Some(editor) = app.domains.selected_editor_mut() else {
        return;
    };
    let result = app.core.block_on(editor.save());
    match result {
        Ok(()) => app.set_status("Saved"),
        Err(e) => report(app, "Save", &e),
    }
    tick(app);
}

fn submit_form(app: &mut App) {
    let result = app.core.block_on(app.domains.form.submit());
    match result {
        Ok(_) => app.set_status("Domain added"),
        Err(e) => report(app, "Add domain", &e),
    }
    tick(app);
}

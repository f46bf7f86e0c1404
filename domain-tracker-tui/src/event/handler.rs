//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ContentMessage, ModalMessage};
use crate::model::App;

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // 终端窗口大小改变时下一轮自动重绘
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press 事件，忽略 Release 和 Repeat
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    // 如果有弹窗打开，优先处理弹窗输入
    if app.modal.is_open() {
        return handle_modal_keys(key);
    }

    // 全局快捷键（无论焦点在哪里）
    if DefaultKeymap::FORCE_QUIT.matches(&key) || DefaultKeymap::ALT_QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::HELP.matches(&key) {
        return AppMessage::ShowHelp;
    }
    if DefaultKeymap::SIGN_IN.matches(&key) {
        return AppMessage::SignIn;
    }
    if DefaultKeymap::SIGN_OUT.matches(&key) {
        return AppMessage::SignOut;
    }
    if DefaultKeymap::TOGGLE_THEME.matches(&key) {
        return AppMessage::ToggleTheme;
    }
    if DefaultKeymap::SWITCH_PANEL.matches(&key) {
        return AppMessage::ToggleFocus;
    }

    if app.focus.is_form() {
        handle_form_keys(key)
    } else if app.domains.is_editing_selected() {
        handle_editing_keys(key)
    } else {
        handle_table_keys(key)
    }
}

/// 浏览表格时的按键
fn handle_table_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::ACTION_EDIT.matches(&key) {
        return AppMessage::Content(ContentMessage::Edit);
    }
    if DefaultKeymap::ACTION_RENEW.matches(&key) {
        return AppMessage::Content(ContentMessage::Renew);
    }
    if DefaultKeymap::ACTION_DELETE.matches(&key) {
        return AppMessage::Content(ContentMessage::Delete);
    }
    if DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::ClearStatus;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Content(ContentMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Content(ContentMessage::SelectNext),
        KeyCode::Home => AppMessage::Content(ContentMessage::SelectFirst),
        KeyCode::End => AppMessage::Content(ContentMessage::SelectLast),
        KeyCode::Enter | KeyCode::Char('e') => AppMessage::Content(ContentMessage::Edit),
        KeyCode::Char('?') => AppMessage::ShowHelp,
        _ => AppMessage::Noop,
    }
}

/// 编辑选中行时的按键
fn handle_editing_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::Content(ContentMessage::Cancel);
    }
    match key.code {
        KeyCode::Enter => AppMessage::Content(ContentMessage::Confirm),
        _ => handle_input_keys(key),
    }
}

/// 新建表单中的按键
fn handle_form_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::ACTION_CLEAR_FORM.matches(&key) {
        return AppMessage::Content(ContentMessage::ClearForm);
    }
    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::ToggleFocus;
    }
    match key.code {
        KeyCode::Enter => AppMessage::Content(ContentMessage::Confirm),
        _ => handle_input_keys(key),
    }
}

/// 文本输入（编辑行与新建表单共用）
fn handle_input_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Left | KeyCode::BackTab => AppMessage::Content(ContentMessage::PrevColumn),
        KeyCode::Right => AppMessage::Content(ContentMessage::NextColumn),
        KeyCode::Backspace => AppMessage::Content(ContentMessage::Backspace),
        KeyCode::Char(ch)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            AppMessage::Content(ContentMessage::Input(ch))
        }
        _ => AppMessage::Noop,
    }
}

/// 处理弹窗中的按键：帮助和错误弹窗只响应关闭按键
fn handle_modal_keys(key: KeyEvent) -> AppMessage {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c'))
        | (KeyModifiers::NONE, KeyCode::Esc | KeyCode::Enter) => {
            AppMessage::Modal(ModalMessage::Close)
        }
        _ => AppMessage::Noop,
    }
}

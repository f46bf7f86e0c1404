//! 底部状态栏组件

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::{App, FocusPanel};
use crate::view::theme::{colors, Styles};

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    // 根据当前焦点和编辑状态生成快捷键提示
    let hints = get_hints(app);

    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    // 如果有状态消息，紧跟在提示后面
    if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    }

    // 右侧显示主题名称，宽度不够时省略
    let theme_label = format!("{:?} ", app.config.theme);
    let used: usize = spans.iter().map(|span| span.content.width()).sum();
    let free = (area.width as usize).saturating_sub(used + theme_label.width());
    if free > 0 {
        spans.push(Span::raw(" ".repeat(free)));
        spans.push(Span::styled(theme_label, Style::default().fg(colors().selected_fg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// 根据当前状态生成快捷键提示
fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = Vec::new();

    if app.identity().is_none() {
        hints.push(("Alt+i", "Sign In"));
        hints.push(("Alt+q", "Quit"));
        return hints;
    }

    match app.focus {
        FocusPanel::Table if app.domains.is_editing_selected() => {
            hints.push(("←→", "Column"));
            hints.push(("Enter", "Save"));
            hints.push(("Esc", "Cancel"));
        }
        FocusPanel::Table => {
            hints.push(("↑↓", "Select"));
            hints.push(("Enter", "Edit"));
            hints.push(("Alt+r", "Renew"));
            hints.push(("Alt+d", "Delete"));
            hints.push(("Tab", "Add Form"));
        }
        FocusPanel::Form => {
            hints.push(("←→", "Column"));
            hints.push(("Enter", "Add"));
            hints.push(("Alt+c", "Clear"));
            hints.push(("Tab", "Table"));
        }
    }

    hints.push(("Alt+h", "Help"));
    hints.push(("Alt+q", "Quit"));

    hints
}

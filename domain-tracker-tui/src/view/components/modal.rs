//! 弹窗组件

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{App, Modal};
use crate::view::theme::{colors, Styles};

/// 帮助弹窗中的快捷键分组
const HELP_SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Global",
        &[
            ("Tab", "Switch table / add form"),
            ("Alt+i", "Sign in"),
            ("Alt+o", "Sign out"),
            ("Alt+t", "Toggle theme"),
            ("Alt+q", "Quit"),
        ],
    ),
    (
        "Table",
        &[
            ("↑↓/jk", "Select row"),
            ("Enter", "Edit row / save edit"),
            ("Esc", "Cancel edit"),
            ("Alt+r", "Renew one year"),
            ("Alt+d", "Delete row"),
        ],
    ),
    (
        "Add form",
        &[
            ("←→", "Switch column"),
            ("Space", "Toggle checkbox"),
            ("Enter", "Add domain"),
            ("Alt+c", "Clear form"),
        ],
    ),
];

/// 渲染弹窗（如果有活动弹窗）
pub fn render(app: &App, frame: &mut Frame) {
    let Some(ref modal) = app.modal.active else {
        return;
    };

    match modal {
        Modal::Error { title, message } => render_error(frame, title, message),
        Modal::Help => render_help(frame),
    }
}

/// 计算居中弹窗区域
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 弹窗边框
fn modal_block(title: &str, border: Style) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border)
}

/// 渲染错误弹窗
fn render_error(frame: &mut Frame, title: &str, message: &str) {
    let c = colors();
    let area = centered_rect(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = modal_block(title, Style::default().fg(c.error));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::styled(message, Style::default().fg(c.fg)),
        Line::from(""),
        Line::styled("Press Esc or Enter to close", Styles::muted()),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// 渲染帮助弹窗
fn render_help(frame: &mut Frame) {
    let c = colors();
    let rows: usize = HELP_SECTIONS.iter().map(|(_, keys)| keys.len() + 2).sum();
    let height = u16::try_from(rows + 3).unwrap_or(u16::MAX);
    let area = centered_rect(50, height, frame.area());
    frame.render_widget(Clear, area);

    let block = modal_block("Help", Styles::border(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (section, keys) in HELP_SECTIONS {
        lines.push(Line::styled(
            section,
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
        ));
        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<8}"), Styles::hint_key()),
                Span::styled(*desc, Style::default().fg(c.fg)),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::styled("Press Esc to close the help", Styles::muted()));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(60, 9, area);
        assert_eq!(rect, Rect::new(0, 0, 40, 9));

        let rect = centered_rect(20, 4, area);
        assert_eq!(rect, Rect::new(10, 3, 20, 4));
    }
}

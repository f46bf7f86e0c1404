//! 主布局渲染

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::App;

use super::components;
use super::pages;
use super::theme::{colors, Styles};

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 四层布局：标题栏 + 域名表格 + 新建表单 + 状态栏
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Min(3),    // 域名表格
            Constraint::Length(4), // 新建表单
            Constraint::Length(1), // 状态栏
        ])
        .split(size);

    render_title_bar(app, frame, main_layout[0]);
    render_table_panel(app, frame, main_layout[1]);
    render_form_panel(app, frame, main_layout[2]);
    components::statusbar::render(app, frame, main_layout[3]);

    // 渲染弹窗（在最上层）
    components::modal::render(app, frame);
}

/// 渲染标题栏
fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let user = match app.identity() {
        Some(identity) => Span::styled(
            identity.label().to_string(),
            Style::default().fg(c.selected_fg).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("Not signed in", Style::default().fg(c.selected_fg)),
    };
    let title = Paragraph::new(Line::from(vec![
        Span::raw(concat!(" Domain Tracker v", env!("CARGO_PKG_VERSION"), "  ·  ")),
        user,
    ]))
    .style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(title, area);
}

/// 面板边框
fn panel_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(colors().fg).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Styles::border(focused))
}

/// 渲染域名表格面板
fn render_table_panel(app: &App, frame: &mut Frame, area: Rect) {
    let block = panel_block("Domains", app.focus.is_table());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.identity().is_none() {
        pages::domains::render_signed_out(frame, inner);
    } else {
        pages::domains::render_table(app, frame, inner);
    }
}

/// 渲染新建表单面板
fn render_form_panel(app: &App, frame: &mut Frame, area: Rect) {
    let block = panel_block("Add Domain", app.focus.is_form());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    pages::domains::render_form(app, frame, inner);
}

//! 域名表格与新建表单视图
//!
//! 表头、数据行与表单都按 `FIELDS` 的顺序和权重布局

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
    Frame,
};

use domain_tracker_core::schema::{FieldDef, InputKind, CHECKBOX_CHECKED, FIELDS};
use domain_tracker_core::types::{DomainRecord, RecordFields};
use domain_tracker_core::Rendered;

use crate::model::App;
use crate::view::theme::Styles;

/// 选中行前的标记，表单用同样宽度的空白对齐
const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// 渲染未登录提示
pub fn render_signed_out(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::styled("  Not signed in.", Style::default()),
        Line::from(""),
        Line::styled("  Press Alt+i to sign in.", Styles::muted()),
    ];
    frame.render_widget(Paragraph::new(content), area);
}

/// 渲染域名表格
pub fn render_table(app: &App, frame: &mut Frame, area: Rect) {
    let rows = app.domains.rows();
    if rows.is_empty() {
        let content = vec![
            Line::from(""),
            Line::styled("  No domains yet.", Style::default()),
            Line::from(""),
            Line::styled("  Press Tab to add one below.", Styles::muted()),
        ];
        frame.render_widget(Paragraph::new(content), area);
        return;
    }

    let now = app.core.ctx().clock.now();
    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let working = app
                .domains
                .editors
                .get(&record.id)
                .and_then(|editor| editor.working());
            match working {
                Some(working) => {
                    let cursor = (i == app.domains.selected() && app.focus.is_table())
                        .then(|| app.domains.current_column());
                    editing_row(record, working, cursor, now)
                }
                None => display_row(record, now),
            }
        })
        .collect();

    let table = Table::new(body, column_widths())
        .header(header_row())
        .row_highlight_style(Styles::selected())
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always);

    let mut state = TableState::default().with_selected(Some(app.domains.selected()));
    frame.render_stateful_widget(table, area, &mut state);
}

/// 渲染新建表单：表头 + 一行输入框
pub fn render_form(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus.is_form();
    let fields = app.domains.form.fields();
    let cursor = focused.then(|| app.domains.current_form_column());

    let cells = FIELDS.iter().map(|def| {
        if def.read_only {
            return Cell::from("");
        }
        let is_cursor = cursor.is_some_and(|c| c.key == def.key);
        input_cell(def, fields, is_cursor)
    });

    let table = Table::new([Row::new(cells)], column_widths())
        .header(header_row())
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always);
    frame.render_widget(table, area);
}

/// 按布局权重（十分之一为单位）分配的列宽
fn column_widths() -> Vec<Constraint> {
    FIELDS
        .iter()
        .map(|def| Constraint::Fill(def.layout_weight()))
        .collect()
}

fn header_row() -> Row<'static> {
    Row::new(FIELDS.iter().map(|def| Cell::from(def.display_name))).style(Styles::header())
}

/// 只读行：每列经格式化后显示
fn display_row(record: &DomainRecord, now: DateTime<Utc>) -> Row<'static> {
    Row::new(FIELDS.iter().map(|def| rendered_cell(&def.render(record, now))))
}

/// 编辑中的行：可编辑列显示工作副本，只读列仍显示格式化结果
fn editing_row(
    record: &DomainRecord,
    working: &RecordFields,
    cursor: Option<&FieldDef>,
    now: DateTime<Utc>,
) -> Row<'static> {
    let cells = FIELDS.iter().map(|def| {
        if def.read_only {
            return rendered_cell(&def.render(record, now));
        }
        let is_cursor = cursor.is_some_and(|c| c.key == def.key);
        input_cell(def, working, is_cursor)
    });
    Row::new(cells).style(Styles::editing())
}

fn rendered_cell(rendered: &Rendered) -> Cell<'static> {
    let text = rendered.visible_text().to_string();
    let style = match rendered {
        Rendered::Link { .. } => Styles::link(),
        _ if rendered.is_warning() => Styles::warning(),
        _ => Style::default(),
    };
    Cell::from(Span::styled(text, style))
}

fn input_cell(def: &FieldDef, fields: &RecordFields, is_cursor: bool) -> Cell<'static> {
    let value = fields.get(def.key).unwrap_or_default();
    let text = match def.input_kind {
        InputKind::Checkbox if value == CHECKBOX_CHECKED => "[x]".to_string(),
        InputKind::Checkbox => "[ ]".to_string(),
        InputKind::Text | InputKind::Date if is_cursor => format!("{value}▎"),
        InputKind::Text | InputKind::Date => value.to_string(),
    };
    let style = if is_cursor {
        Styles::input_cursor()
    } else {
        Style::default()
    };
    Cell::from(Span::styled(text, style))
}

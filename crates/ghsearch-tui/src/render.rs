//! Pure view functions.
//!
//! Render takes `&AppState`, draws to the frame, and never mutates state.
//! `layout` is shared with the reducer so mouse hit-testing uses the same
//! rectangles that were drawn.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::state::AppState;

pub const HEADING: &str = "GitHub User Search";
pub const PLACEHOLDER: &str = "Enter user name";
pub const EMPTY_TEXT: &str = "No data";

const HEADING_HEIGHT: u16 = 1;
const INPUT_HEIGHT: u16 = 3;
const HINT_HEIGHT: u16 = 1;

/// Spinner frames shown while a request is pending.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 6;

/// Screen regions, computed from the terminal size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub heading: Rect,
    pub input: Rect,
    pub table: Rect,
    /// Table rows only (inside the border, below the header).
    pub body: Rect,
    pub hint: Rect,
}

pub fn layout(area: Rect) -> AppLayout {
    let [heading, input, table, hint] = Layout::vertical([
        Constraint::Length(HEADING_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(HINT_HEIGHT),
    ])
    .areas(area);

    let inner = Block::default().borders(Borders::ALL).inner(table);
    let body = Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    };

    AppLayout {
        heading,
        input,
        table,
        body,
        hint,
    }
}

pub fn render(app: &AppState, frame: &mut Frame) {
    let layout = layout(frame.area());

    let heading = Paragraph::new(Line::from(Span::styled(
        HEADING,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(heading, layout.heading);

    render_input(app, frame, layout.input);
    render_table(app, frame, layout.table);

    let hint = Paragraph::new(Line::from(Span::styled(
        "↑/↓ select · Enter open profile · Esc quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hint, layout.hint);
}

fn render_input(app: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.input.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(placeholder, inner);
        frame.set_cursor_position((inner.x, inner.y));
        return;
    }

    let (visible, cursor_x) = app.input.visible_window(usize::from(inner.width));
    frame.render_widget(Paragraph::new(visible), inner);
    frame.set_cursor_position((inner.x.saturating_add(cursor_x), inner.y));
}

fn spinner(app: &AppState) -> &'static str {
    SPINNER_FRAMES[(app.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

fn render_table(app: &AppState, frame: &mut Frame, area: Rect) {
    let table = app.search.table();

    let mut title = vec![Span::raw(" Results ")];
    if table.loading {
        title.push(Span::styled(
            format!("{} ", spinner(app)),
            Style::default().fg(Color::Yellow),
        ));
    } else if !table.data_source.is_empty() {
        title.push(Span::styled(
            format!("({}) ", table.data_source.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new(table.headers().into_iter().map(Cell::from))
        .style(Style::default().add_modifier(Modifier::BOLD));

    if table.data_source.is_empty() {
        frame.render_widget(Table::new(Vec::<Row>::new(), column_widths()).header(header), inner);

        let body = Rect {
            y: inner.y.saturating_add(1),
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let text = if table.loading {
            Span::styled(
                format!("{} Searching...", spinner(app)),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled(EMPTY_TEXT, Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), body);
        return;
    }

    let view = &app.results;
    let visible = usize::from(inner.height.saturating_sub(1));
    let rows: Vec<Row> = table
        .rows()
        .into_iter()
        .enumerate()
        .skip(view.offset)
        .take(visible)
        .map(|(index, cells)| Row::new(cells).style(row_style(app, index)))
        .collect();

    frame.render_widget(Table::new(rows, column_widths()).header(header), inner);
}

fn column_widths() -> [Constraint; 2] {
    [Constraint::Min(10), Constraint::Length(12)]
}

fn row_style(app: &AppState, index: usize) -> Style {
    let view = &app.results;
    if view.is_pressed(index) {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else if index == view.selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else if view.hovered == Some(index) {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    }
}

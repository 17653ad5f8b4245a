//! UI rendering with Ratatui.

use crate::app::{App, AppState, Field, InputMode, Modal};
use guestbook_core::{BackendStatus, Entry, LoadState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    if app.state == AppState::Quit {
        return;
    }

    let area = frame.area();
    let needs_author = app.board.schema().requires_author();
    let form_height = if needs_author { 8 } else { 6 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Header
            Constraint::Length(form_height), // Form
            Constraint::Min(3),              // Entries
            Constraint::Length(1),           // Help line
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_entries(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    if let Some(modal) = app.active_modal() {
        render_modal(frame, modal, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let schema = app.board.schema();
    let block = Block::default()
        .title(format!(" 📝 {} ", schema.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled("Backend: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.api_url.as_str(), Style::default().fg(Color::White)),
    ];

    if schema.supports_health() {
        let status = app.board.backend_status();
        let color = match status {
            BackendStatus::Checking => Color::DarkGray,
            BackendStatus::Reported(_) => Color::Green,
            BackendStatus::Unknown => Color::Yellow,
            BackendStatus::ConnectionFailed => Color::Red,
        };
        spans.push(Span::styled("  Connected to: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(status.to_string(), Style::default().fg(color)));
    }

    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!("  ⟳ {}", app.in_flight),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing && app.active_modal().is_none();
    let border_color = if editing { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" ✏️  New entry ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form = &app.board.form;
    let cursor = |field: Field| if editing && app.field == field { "_" } else { "" };
    let label_style = |field: Field| {
        if editing && app.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let content_area = if app.board.schema().requires_author() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        let author = Paragraph::new(Line::from(vec![
            Span::styled("Name: ", label_style(Field::Author)),
            Span::raw(form.author.as_str()),
            Span::raw(cursor(Field::Author)),
        ]));
        frame.render_widget(author, chunks[0]);
        chunks[1]
    } else {
        inner
    };

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        "Message:",
        label_style(Field::Content),
    ))];
    if form.content.is_empty() && !editing {
        lines.push(Line::from(Span::styled(
            "Write something...",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let mut text: Vec<Line> = form.content.split('\n').map(Line::raw).collect();
        if let Some(last) = text.last_mut() {
            last.push_span(Span::raw(cursor(Field::Content)));
        }
        lines.extend(text);
    }

    let content = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(content, content_area);
}

fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.input_mode == InputMode::Normal && app.active_modal().is_none();
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let state_note = match app.board.load_state() {
        LoadState::Loading => " (loading...)",
        LoadState::Failed(_) => " (refresh failed)",
        LoadState::Idle | LoadState::Loaded => "",
    };

    let block = Block::default()
        .title(format!(" 📋 Entries: {}{} ", app.board.entries().len(), state_note))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.board.entries().is_empty() {
        let message = Paragraph::new("No entries yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(message, centered_rect(inner.width, 1, inner));
        return;
    }

    let items: Vec<ListItem> = app.board.entries().iter().map(entry_item).collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(Color::Rgb(60, 60, 80))
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, inner, &mut state);
}

fn entry_item(entry: &Entry) -> ListItem<'_> {
    let mut heading = vec![Span::styled(
        format!("#{} ", entry.id),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(author) = &entry.author {
        heading.push(Span::styled(
            format!("{author} "),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }
    heading.push(Span::styled(
        format!("({})", entry.display_created_at()),
        Style::default().fg(Color::Blue),
    ));

    let mut lines = vec![Line::from(heading)];
    lines.extend(
        entry
            .content
            .lines()
            .map(|line| Line::styled(format!("  {line}"), Style::default().fg(Color::White))),
    );
    lines.push(Line::raw(""));

    ListItem::new(lines)
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.input_mode {
        InputMode::Editing if app.board.schema().requires_author() => {
            "Enter: next/submit | Tab: switch field | Alt+Enter: new line | Esc: done"
        }
        InputMode::Editing => "Enter: submit | Alt+Enter: new line | Esc: done",
        InputMode::Normal if app.board.schema().supports_delete() => {
            "i: write | j/k: move | d: delete | r: refresh | h: health | q: quit"
        }
        InputMode::Normal => "i: write | j/k: move | r: refresh | q: quit",
    };

    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

fn render_modal(frame: &mut Frame, modal: &Modal, area: Rect) {
    let (title, message, hint, color) = match modal {
        Modal::Alert(message) => (" Notice ", message.as_str(), "Enter: OK", Color::Yellow),
        Modal::ConfirmDelete { message, .. } => {
            (" Confirm ", message.as_str(), "y: delete | n: cancel", Color::Red)
        }
    };

    let dialog_width = 50.min(area.width.saturating_sub(4));
    let dialog_height = 7.min(area.height.saturating_sub(2));
    let dialog_area = centered_rect(dialog_width, dialog_height, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[0]);

    let hint = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    frame.render_widget(hint, chunks[1]);
}

/// Helper to create a centered rectangle.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

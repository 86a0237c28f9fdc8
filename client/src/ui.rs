//! Rendering for the catalog terminal UI

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use catalog_client::{ListState, Severity};

use crate::app::{App, Focus};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search + filters
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Bulk bar / status
            Constraint::Length(1), // Toast
        ])
        .split(frame.area());

    render_search_bar(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_status_line(frame, app, chunks[2]);
    render_toast(frame, app, chunks[3]);

    if app.controller.form().is_some() {
        render_form(frame, app);
    }
    if let Some(action) = app.controller.pending_bulk() {
        let count = app.controller.selection_len();
        let text = format!(
            "Are you sure you want to {} {} selected item(s)?\n\n[y] confirm   [n] cancel",
            action.verb(),
            count
        );
        render_dialog(frame, " Confirm ", &text, 50, 7);
    }
    if app.show_help {
        render_dialog(frame, " Keys ", HELP, 60, 18);
    }
}

const HELP: &str = "\
j/k, arrows   move
space         select row
a             select / clear all loaded
/             search
i             show or hide inactive items
r             refresh
n             new item
e, enter      edit name
x, delete     delete item
D / A         deactivate / activate selected
q, esc        quit";

fn render_search_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(26)])
        .split(area);

    let search_style = if app.focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let title = if app.search_pending() { " Search ... " } else { " Search " };
    app.search_input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(search_style),
    );
    frame.render_widget(&app.search_input, columns[0]);

    let filter = if app.controller.include_inactive() {
        Span::styled("[x] show inactive (i)", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("[ ] show inactive (i)")
    };
    let filter = Paragraph::new(Line::from(filter))
        .block(Block::default().borders(Borders::ALL).title(" Filter "));
    frame.render_widget(filter, columns[1]);
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let controller = &app.controller;

    let header = Row::new(vec![
        Cell::from(if controller.all_loaded_selected() { "[x]" } else { "[ ]" }),
        Cell::from("Name"),
        Cell::from("Status"),
        Cell::from("Created"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = controller
        .items()
        .iter()
        .map(|item| {
            let checkbox = if controller.is_selected(&item.id) { "[x]" } else { "[ ]" };
            let (status, color) = if item.is_active {
                ("Active", Color::Green)
            } else {
                ("Inactive", Color::DarkGray)
            };
            Row::new(vec![
                Cell::from(checkbox),
                Cell::from(item.name.clone()),
                Cell::from(status).style(Style::default().fg(color)),
                Cell::from(item.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ])
        })
        .collect();

    let title = match controller.state() {
        ListState::InitialLoading => " Items (loading...) ".to_string(),
        ListState::LoadingMore => format!(" Items ({}, loading more...) ", controller.items().len()),
        ListState::Error => format!(" Items ({}, load failed, r to retry) ", controller.items().len()),
        ListState::Idle if controller.has_more() => format!(" Items ({}+) ", controller.items().len()),
        ListState::Idle => format!(" Items ({}) ", controller.items().len()),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Length(9),
            Constraint::Length(17),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.controller.selection_len();
    let line = if selected > 0 {
        Line::from(vec![
            Span::styled(
                format!(" {} selected ", selected),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::raw("  D deactivate  A activate  a clear"),
        ])
    } else {
        Line::from(Span::styled(
            " ? help  / search  n new  q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_toast(frame: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = app.toasts.current() else {
        return;
    };
    let color = match toast.severity {
        Severity::Success => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", toast.message),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    let waiting = app.toasts.waiting();
    if waiting > 0 {
        spans.push(Span::styled(
            format!("(+{} more)", waiting),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form(frame: &mut Frame, app: &mut App) {
    let Some(form) = app.controller.form() else {
        return;
    };
    let title = format!(" {} ", form.title());
    let footer = match (&form.error, form.submitting) {
        (_, true) => Span::styled("Saving...", Style::default().fg(Color::Cyan)),
        (Some(error), false) => Span::styled(error.to_string(), Style::default().fg(Color::Red)),
        (None, false) => Span::styled("enter save   esc cancel", Style::default().fg(Color::DarkGray)),
    };

    let area = centered(frame.area(), 60, 7);
    frame.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(inner);
    frame.render_widget(&app.name_input, rows[0]);
    frame.render_widget(Paragraph::new(Line::from(footer)), rows[1]);
}

fn render_dialog(frame: &mut Frame, title: &str, text: &str, width: u16, height: u16) {
    let area = centered(frame.area(), width, height);
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(dialog, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

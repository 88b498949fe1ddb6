//! Layout components (header, status bar)

use crate::app::App;
use crate::config::TransportKind;
use crate::state::{SubmitState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the page header
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                " JRB Industries",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Premium bricks for modern construction",
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            " Contact Us",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Active transport
    let transport = match app.transport.kind() {
        TransportKind::RelayScript => " ✉ relay script ",
        TransportKind::HttpPost => " ✉ http post ",
    };
    spans.push(Span::styled(transport, Style::default().fg(Color::Blue)));

    if app.controller.state() == SubmitState::Submitting {
        spans.push(Span::styled(
            "● sending ",
            Style::default().fg(Color::Yellow),
        ));
    } else if app.controller.has_errors() {
        spans.push(Span::styled("● fix fields ", Style::default().fg(Color::Red)));
    }

    spans.push(Span::styled(
        get_view_hints(app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    // Copy message
    if let Some(msg) = &app.copy_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::ContactForm => format!(
            "Tab:next  Enter:next/send  {}:send  F2:products  F3:location",
            crate::platform::SUBMIT_SHORTCUT
        ),
        View::Products => "←/→:product  j/k:scroll  Enter:get quote  Esc:close".to_string(),
        View::Location => format!("{}:copy directions  Esc:close", crate::platform::COPY_HINT),
    }
}

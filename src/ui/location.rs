//! Business location panel

use super::components::{render_dialog, text_width, wrap_text, DialogConfig};
use crate::state::catalog::Location;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const MAX_WIDTH: u16 = 64;

fn row(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<11}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Draw the location panel with a copyable directions link
pub fn draw(frame: &mut Frame, location: &Location) {
    let url = location.directions_url();
    let mut body = vec![
        Line::from(Span::styled(
            location.name,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        row("Address", location.address.to_string()),
        row("Phone", location.phone.to_string()),
        row("Email", location.email.to_string()),
        row("Coordinates", format!("{}, {}", location.lat, location.lng)),
        Line::from(""),
        Line::from(Span::styled(
            "Get Directions",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    body.extend(wrap_text(&url, text_width(MAX_WIDTH)).into_iter().map(|l| {
        Line::from(Span::styled(
            l,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ))
    }));

    let key_style = Style::default().fg(Color::Cyan);
    let hint = vec![
        Span::styled(crate::platform::COPY_HINT, key_style),
        Span::raw(": copy link  "),
        Span::styled("Esc", key_style),
        Span::raw(": close"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Visit Our Facility",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            body,
            hint: Some(hint),
            max_width: MAX_WIDTH,
            scroll: 0,
        },
    );
}

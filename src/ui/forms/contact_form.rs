//! Contact form rendering

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::state::Form;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Width of the submit button
const SUBMIT_BUTTON_WIDTH: u16 = 20;

/// Draw the contact form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.controller.form;

    let block = Block::default()
        .title(" Get In Touch ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|f| {
            if f.is_multiline() {
                Constraint::Min(FIELD_HEIGHT + 2)
            } else {
                Constraint::Length(FIELD_HEIGHT)
            }
        })
        .chain([
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Help text
        ])
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (idx, field) in form.fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[idx],
            field,
            form.active_field() == idx,
            app.controller.error(&field.name),
        );
    }

    let buttons_row = chunks[form.fields.len()];
    let button_area = Rect {
        width: SUBMIT_BUTTON_WIDTH.min(buttons_row.width),
        ..buttons_row
    };
    let button = app.controller.button();
    render_button(
        frame,
        button_area,
        button.label,
        form.is_buttons_row_active(),
        button.enabled,
    );

    let active_is_select = form
        .get_field(form.active_field())
        .is_some_and(|f| f.options.len() > 1);
    let mut hints = vec![("Tab", "next field")];
    if active_is_select {
        hints.push(("←/→", "choose"));
    }
    hints.push((crate::platform::SUBMIT_SHORTCUT, "send"));
    hints.push(("F2", "products"));
    hints.push(("F3", "location"));
    draw_help_text(frame, chunks[form.fields.len() + 1], &hints);
}

//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod location;
mod toast;

pub use toast::TerminalToast;

use crate::app::App;
use crate::state::{catalog::LOCATION, View};
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);
    forms::draw_contact_form(frame, main_area, app);

    // Overlays on top of the form
    match app.state.current_view {
        View::ContactForm => {}
        View::Products => components::render_product_dialog(
            frame,
            app.state.selected_product(),
            app.state.scroll_offset,
        ),
        View::Location => location::draw(frame, &LOCATION),
    }

    app.notifications
        .presenter()
        .draw(frame, main_area, Instant::now());

    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }

    layout::draw_status_bar(frame, status_area, app);
}

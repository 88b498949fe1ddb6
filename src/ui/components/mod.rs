//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, BUTTON_HEIGHT};
pub use dialog::{
    render_dialog, render_error_dialog, render_product_dialog, text_width, wrap_text,
    DialogConfig,
};

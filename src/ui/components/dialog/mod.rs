//! Dialog components for TUI

mod base;
mod error_dialog;
mod product_dialog;

pub use base::{render_dialog, text_width, wrap_text, DialogConfig};
pub use error_dialog::render_error_dialog;
pub use product_dialog::render_product_dialog;

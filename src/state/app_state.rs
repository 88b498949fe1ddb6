//! Application state definitions

use super::catalog::{product_index, Product, PRODUCTS};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    ContactForm,
    /// Product catalog dialog over the form
    Products,
    /// Business location panel over the form
    Location,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Product catalog
    pub selected_product: usize,
    pub scroll_offset: usize,

    // Modal error queue, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    /// Open the product dialog on a given product
    pub fn open_products(&mut self, key: &str) {
        self.selected_product = product_index(key);
        self.scroll_offset = 0;
        self.current_view = View::Products;
    }

    pub fn open_location(&mut self) {
        self.current_view = View::Location;
    }

    /// Close any overlay and return to the form
    pub fn close_overlay(&mut self) {
        self.current_view = View::ContactForm;
        self.scroll_offset = 0;
    }

    pub fn selected_product(&self) -> &'static Product {
        &PRODUCTS[self.selected_product % PRODUCTS.len()]
    }

    /// Cycle to the next product, wrapping
    pub fn next_product(&mut self) {
        self.selected_product = (self.selected_product + 1) % PRODUCTS.len();
        self.scroll_offset = 0;
    }

    /// Cycle to the previous product, wrapping
    pub fn prev_product(&mut self) {
        self.selected_product = self
            .selected_product
            .checked_sub(1)
            .unwrap_or(PRODUCTS.len() - 1);
        self.scroll_offset = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

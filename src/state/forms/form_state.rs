//! Contact form state and the controller driving validation and submission

use super::field::FormField;
use super::payload::{SubmissionOutcome, SubmissionPayload};
use super::validator::{validate, ValidationResult};
use crate::state::notification::{NotificationKind, NotificationPresenter, Presenter};
use crate::transport::TransportAdapter;
use std::collections::BTreeMap;
use uuid::Uuid;

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SUBMITTING_LABEL: &str = "Sending...";

pub const CORRECT_ERRORS_MESSAGE: &str = "Please correct the errors above";
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again.";

/// Options offered by the inquiry type select
pub const INQUIRY_TYPES: &[&str] = &[
    "General Inquiry",
    "Cement Interlocking Bricks",
    "Classic Cement Bricks",
    "Light Weight Bricks",
    "Bulk Order",
];

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// The contact form's fields plus focus. The last focus slot is the submit
/// button row.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FormField::text("name", "Full Name", true),
                FormField::email("email", "Email Address", true),
                FormField::telephone("phone", "Phone Number", false),
                FormField::select("inquiryType", "Inquiry Type", false, INQUIRY_TYPES),
                FormField::textarea("message", "Message", true),
            ],
            active_field_index: 0,
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Focus a field by name
    pub fn focus(&mut self, name: &str) {
        if let Some(index) = self.fields.iter().position(|f| f.name == name) {
            self.active_field_index = index;
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ContactForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

/// Submit button lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub enabled: bool,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            label: SUBMIT_LABEL,
            enabled: true,
        }
    }
}

/// A submission that passed validation and is ready to send
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub id: Uuid,
    pub payload: SubmissionPayload,
}

/// Drives field validation, error display and the submit lifecycle
#[derive(Debug, Default)]
pub struct FormController {
    pub form: ContactForm,
    /// Error message shown next to each errored field, by field name
    errors: BTreeMap<String, String>,
    state: SubmitState,
    button: SubmitButton,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    /// Error currently shown for a field
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Validate a field that lost focus and update its error display
    pub fn on_blur(&mut self, name: &str) -> ValidationResult {
        let Some(field) = self.form.field(name) else {
            return ValidationResult::ok();
        };
        let result = validate(field);
        self.show_result(name, &result);
        result
    }

    /// Clear a field's error as soon as it is edited. The field is not
    /// revalidated until its next blur.
    pub fn on_input(&mut self, name: &str) {
        self.errors.remove(name);
    }

    /// Validate every required field, displaying every failure
    pub fn validate_all(&mut self) -> bool {
        let results: Vec<(String, ValidationResult)> = self
            .form
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| (f.name.clone(), validate(f)))
            .collect();

        let mut all_valid = true;
        for (name, result) in results {
            all_valid &= result.valid;
            self.show_result(&name, &result);
        }
        all_valid
    }

    /// Check the format of optional fields that have a value
    fn validate_filled_optional(&mut self) -> bool {
        let results: Vec<(String, ValidationResult)> = self
            .form
            .fields
            .iter()
            .filter(|f| !f.required && !f.as_text().trim().is_empty())
            .map(|f| (f.name.clone(), validate(f)))
            .collect();

        let mut all_valid = true;
        for (name, result) in results {
            all_valid &= result.valid;
            self.show_result(&name, &result);
        }
        all_valid
    }

    fn show_result(&mut self, name: &str, result: &ValidationResult) {
        match &result.message {
            Some(message) if !result.valid => {
                self.errors.insert(name.to_string(), message.clone());
            }
            _ => {
                self.errors.remove(name);
            }
        }
    }

    /// Start a submission. Returns the ticket to send, or `None` when a
    /// submission is already in flight or the form is invalid.
    pub fn begin_submit<P: Presenter>(
        &mut self,
        notifications: &mut NotificationPresenter<P>,
    ) -> Option<SubmissionTicket> {
        if self.state == SubmitState::Submitting {
            tracing::debug!("Ignoring submit while a submission is in flight");
            return None;
        }

        // Both passes run so every failure is displayed
        let required_ok = self.validate_all();
        let optional_ok = self.validate_filled_optional();
        if !(required_ok && optional_ok) {
            notifications.show(CORRECT_ERRORS_MESSAGE, NotificationKind::Error);
            return None;
        }

        self.state = SubmitState::Submitting;
        self.button = SubmitButton {
            label: SUBMITTING_LABEL,
            enabled: false,
        };

        let ticket = SubmissionTicket {
            id: Uuid::new_v4(),
            payload: SubmissionPayload::from_fields(&self.form.fields),
        };
        tracing::info!("Submission {} started", ticket.id);
        Some(ticket)
    }

    /// Finish the in-flight submission with its outcome. The submit button is
    /// restored whatever the outcome.
    pub fn finish_submit<P: Presenter>(
        &mut self,
        id: Uuid,
        outcome: &SubmissionOutcome,
        notifications: &mut NotificationPresenter<P>,
    ) {
        match outcome {
            SubmissionOutcome::Success => {
                tracing::info!("Submission {id} delivered");
                notifications.show(SUCCESS_MESSAGE, NotificationKind::Success);
                self.form.clear();
                self.errors.clear();
            }
            SubmissionOutcome::Failure(reason) => {
                tracing::error!("Error sending message (submission {id}): {reason}");
                notifications.show(FAILURE_MESSAGE, NotificationKind::Error);
            }
        }

        self.state = SubmitState::Idle;
        self.button = SubmitButton::default();
    }

    /// Validate, send and report in one call
    pub async fn submit<P: Presenter>(
        &mut self,
        transport: &TransportAdapter,
        notifications: &mut NotificationPresenter<P>,
    ) -> Option<SubmissionOutcome> {
        let ticket = self.begin_submit(notifications)?;
        let outcome = transport.send(&ticket.payload).await;
        self.finish_submit(ticket.id, &outcome, notifications);
        Some(outcome)
    }
}

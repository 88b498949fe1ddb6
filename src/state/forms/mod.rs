//! Form domain layer
//!
//! Field values, client-side validation and the contact form's submit
//! lifecycle.

mod field;
mod form_state;
mod payload;
mod validator;

pub use field::{FieldKind, FormField};
pub use form_state::{Form, FormController, SubmitState};
pub use payload::{SubmissionOutcome, SubmissionPayload};

#[cfg(test)]
pub use form_state::{
    CORRECT_ERRORS_MESSAGE, FAILURE_MESSAGE, INQUIRY_TYPES, SUBMITTING_LABEL, SUCCESS_MESSAGE,
};

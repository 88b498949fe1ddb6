//! Submission payload and outcome

use super::field::FormField;
use serde::{Deserialize, Serialize};

/// Field values collected for one submit attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub inquiry_type: String,
    pub message: String,
}

impl SubmissionPayload {
    /// Collect values from form fields by name. Unknown names are ignored and
    /// missing names stay empty.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FormField>) -> Self {
        let mut payload = Self::default();
        for field in fields {
            let slot = match field.name.as_str() {
                "name" => &mut payload.name,
                "email" => &mut payload.email,
                "phone" => &mut payload.phone,
                "inquiryType" => &mut payload.inquiry_type,
                "message" => &mut payload.message,
                _ => continue,
            };
            *slot = field.as_text().to_string();
        }
        payload
    }
}

/// Normalized result of a transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure(String),
}

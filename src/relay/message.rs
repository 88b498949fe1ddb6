//! Incoming contact requests and the email composed from them

use super::RelayError;
use chrono::{DateTime, TimeZone};
use email_address::EmailAddress;
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

const DEFAULT_INQUIRY_TYPE: &str = "General Inquiry";
/// Fields that must be non-empty, checked in this order
const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

/// Raw request body. Every field is optional so that missing and empty
/// values are reported the same way.
#[derive(Debug, Default, Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, rename = "inquiryType")]
    pub inquiry_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RelayRequest {
    /// Parse a request body. Anything that is not a JSON object of strings
    /// is treated as an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!("Unreadable request body: {e}");
            Self::default()
        })
    }

    fn field(&self, name: &str) -> &str {
        let value = match name {
            "name" => self.name.as_deref(),
            "email" => self.email.as_deref(),
            "phone" => self.phone.as_deref(),
            "inquiryType" => self.inquiry_type.as_deref(),
            "message" => self.message.as_deref(),
            _ => None,
        };
        value.map(str::trim).unwrap_or_default()
    }

    /// Check required fields and the email address
    pub fn validate(&self) -> Result<ContactMessage, RelayError> {
        if let Some(missing) = REQUIRED_FIELDS
            .into_iter()
            .find(|name| self.field(name).is_empty())
        {
            return Err(RelayError::MissingField(missing));
        }

        let email = self.field("email");
        if !is_deliverable_address(email) {
            return Err(RelayError::InvalidEmail);
        }

        let inquiry_type = match self.field("inquiryType") {
            "" => DEFAULT_INQUIRY_TYPE,
            other => other,
        };

        Ok(ContactMessage {
            name: self.field("name").to_string(),
            email: email.to_string(),
            phone: self.field("phone").to_string(),
            inquiry_type: inquiry_type.to_string(),
            message: self.field("message").to_string(),
        })
    }
}

/// RFC address check that also requires a dotted domain, so `jo@x` is
/// rejected
fn is_deliverable_address(email: &str) -> bool {
    EmailAddress::from_str(email).is_ok_and(|address| {
        let domain = address.domain();
        domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    })
}

/// A validated contact submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub inquiry_type: String,
    pub message: String,
}

/// Plain-text email ready for a mailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Sender address, used for From and Reply-To
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

impl ContactMessage {
    /// Render the email with the time the submission was received
    pub fn compose<Tz>(&self, received_at: DateTime<Tz>) -> OutgoingEmail
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let subject = format!(
            "New Inquiry from JRB Industries Website - {}",
            self.inquiry_type
        );
        let body = format!(
            "New contact form submission from JRB Industries website:\n\
             \n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Inquiry Type: {inquiry_type}\n\
             \n\
             Message:\n\
             {message}\n\
             \n\
             ---\n\
             Sent from: JRB Industries Website Contact Form\n\
             Time: {time}\n",
            name = self.name,
            email = self.email,
            phone = self.phone,
            inquiry_type = self.inquiry_type,
            message = self.message,
            time = received_at.format("%Y-%m-%d %H:%M:%S"),
        );

        OutgoingEmail {
            reply_to: self.email.clone(),
            subject,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn request(body: &str) -> RelayRequest {
        RelayRequest::from_body(body.as_bytes())
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_complete_request_is_valid() {
            let message = request(
                r#"{"name":"Jo","email":"jo@x.com","phone":"","inquiryType":"General","message":"Hi"}"#,
            )
            .validate()
            .unwrap();

            assert_eq!(
                message,
                ContactMessage {
                    name: "Jo".to_string(),
                    email: "jo@x.com".to_string(),
                    phone: String::new(),
                    inquiry_type: "General".to_string(),
                    message: "Hi".to_string(),
                }
            );
        }

        #[test]
        fn test_missing_message_is_reported() {
            let err = request(r#"{"name":"Jo","email":"jo@x.com"}"#)
                .validate()
                .unwrap_err();
            assert_eq!(err.to_string(), "Field 'message' is required");
        }

        #[test]
        fn test_required_fields_checked_in_order() {
            let err = request(r#"{"message":"Hi"}"#).validate().unwrap_err();
            assert_eq!(err.to_string(), "Field 'name' is required");

            let err = request(r#"{"name":"Jo","message":"Hi"}"#)
                .validate()
                .unwrap_err();
            assert_eq!(err.to_string(), "Field 'email' is required");
        }

        #[test]
        fn test_whitespace_counts_as_empty() {
            let err = request(r#"{"name":"  ","email":"jo@x.com","message":"Hi"}"#)
                .validate()
                .unwrap_err();
            assert_eq!(err.to_string(), "Field 'name' is required");
        }

        #[test]
        fn test_invalid_email_is_reported() {
            let err = request(r#"{"name":"Jo","email":"not-an-email","message":"Hi"}"#)
                .validate()
                .unwrap_err();
            assert_eq!(err.to_string(), "Invalid email address");
        }

        #[test]
        fn test_dotless_domain_is_rejected() {
            let err = request(r#"{"name":"Jo","email":"jo@x","message":"Hi"}"#)
                .validate()
                .unwrap_err();
            assert_eq!(err.to_string(), "Invalid email address");
        }

        #[test]
        fn test_subdomain_address_is_accepted() {
            let message = request(r#"{"name":"Jo","email":"jo@mail.x.co.in","message":"Hi"}"#)
                .validate()
                .unwrap();
            assert_eq!(message.email, "jo@mail.x.co.in");
        }

        #[test]
        fn test_inquiry_type_defaults() {
            let message = request(r#"{"name":"Jo","email":"jo@x.com","message":"Hi"}"#)
                .validate()
                .unwrap();
            assert_eq!(message.inquiry_type, "General Inquiry");
            assert_eq!(message.phone, "");
        }

        #[test]
        fn test_garbage_body_is_empty_request() {
            let err = request("not json").validate().unwrap_err();
            assert_eq!(err.to_string(), "Field 'name' is required");
        }

        #[test]
        fn test_non_string_values_are_empty_request() {
            let err = request(r#"{"name":42,"email":"jo@x.com","message":"Hi"}"#)
                .validate()
                .unwrap_err();
            assert_eq!(err.to_string(), "Field 'name' is required");
        }
    }

    mod compose {
        use super::*;
        use pretty_assertions::assert_eq;
        use chrono::TimeZone;

        fn message() -> ContactMessage {
            ContactMessage {
                name: "Jo".to_string(),
                email: "jo@x.com".to_string(),
                phone: "+14155551234".to_string(),
                inquiry_type: "Bulk Order".to_string(),
                message: "Need 5000 bricks".to_string(),
            }
        }

        #[test]
        fn test_subject_includes_inquiry_type() {
            let email = message().compose(Utc::now());
            assert_eq!(
                email.subject,
                "New Inquiry from JRB Industries Website - Bulk Order"
            );
            assert_eq!(email.reply_to, "jo@x.com");
        }

        #[test]
        fn test_body_template() {
            let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
            let email = message().compose(at);

            assert_eq!(
                email.body,
                "New contact form submission from JRB Industries website:\n\
                 \n\
                 Name: Jo\n\
                 Email: jo@x.com\n\
                 Phone: +14155551234\n\
                 Inquiry Type: Bulk Order\n\
                 \n\
                 Message:\n\
                 Need 5000 bricks\n\
                 \n\
                 ---\n\
                 Sent from: JRB Industries Website Contact Form\n\
                 Time: 2024-03-09 14:05:07\n"
            );
        }
    }
}

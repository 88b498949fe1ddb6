//! Transport adapters for delivering contact submissions

mod adapter;
mod http_post;
mod relay_script;
mod traits;

pub use adapter::TransportAdapter;
pub use http_post::HttpPostSender;
pub use relay_script::RelayScriptSender;
pub use traits::{MailSender, TransportError};

#[cfg(test)]
pub use traits::MockMailSender;

//! Application state module

mod app_state;
pub mod catalog;
mod forms;
pub mod notification;

pub use app_state::*;
pub use forms::*;
pub use notification::{
    Notification, NotificationKind, NotificationPhase, NotificationPresenter, Presenter,
};

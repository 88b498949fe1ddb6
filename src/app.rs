//! Application state and core logic

use crate::config::ContactConfig;
use crate::state::{
    catalog::LOCATION, AppState, FieldKind, Form, FormController, NotificationPresenter,
    SubmissionOutcome, View,
};
use crate::transport::TransportAdapter;
use crate::ui::TerminalToast;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Window in which a second Ctrl+C quits
/// Poll interval while something on screen is moving (~60fps)
const ANIMATION_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(100);

const QUIT_WINDOW: Duration = Duration::from_secs(1);

/// A submission whose transport call is running in the background
struct PendingSubmission {
    id: Uuid,
    handle: JoinHandle<SubmissionOutcome>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Contact form and its submit lifecycle
    pub controller: FormController,
    pub notifications: NotificationPresenter<TerminalToast>,
    pub transport: TransportAdapter,
    pending: Option<PendingSubmission>,
    /// Whether the app should quit
    quit: bool,
    /// Copy feedback message
    pub copy_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &ContactConfig) -> Result<Self> {
        Ok(Self::with_transport(TransportAdapter::from_config(config)?))
    }

    pub fn with_transport(transport: TransportAdapter) -> Self {
        Self {
            state: AppState::default(),
            controller: FormController::new(),
            notifications: NotificationPresenter::new(TerminalToast::default()),
            transport,
            pending: None,
            quit: false,
            copy_message: None,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether the loop should poll at animation speed
    pub fn is_animating(&self, now: Instant) -> bool {
        let waiting_to_show = self
            .notifications
            .current()
            .is_some_and(|n| !n.is_visible());
        self.pending.is_some() || waiting_to_show || self.notifications.presenter().is_animating(now)
    }

    /// How long the loop may wait for input before the next redraw. Never
    /// sleeps past the live notification's next phase change.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let base = if self.is_animating(now) {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        match self.notifications.next_deadline() {
            Some(deadline) => base.min(deadline.saturating_duration_since(now)),
            None => base,
        }
    }

    /// Advance timers and collect a finished submission
    pub async fn update(&mut self) {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.handle.is_finished())
        {
            self.finish_pending().await;
        }
        self.notifications.tick(Instant::now());
    }

    /// Validate the form and start sending it in the background
    pub fn request_submit(&mut self) {
        let Some(ticket) = self.controller.begin_submit(&mut self.notifications) else {
            return;
        };

        let transport = self.transport.clone();
        let payload = ticket.payload;
        let handle = tokio::spawn(async move { transport.send(&payload).await });
        self.pending = Some(PendingSubmission {
            id: ticket.id,
            handle,
        });
    }

    /// Wait for the in-flight submission, if any, and report its outcome
    pub async fn finish_pending(&mut self) {
        let Some(PendingSubmission { id, handle }) = self.pending.take() else {
            return;
        };

        let outcome = handle.await.unwrap_or_else(|e| {
            tracing::error!("Submission {id} task failed: {e}");
            SubmissionOutcome::Failure(e.to_string())
        });
        self.controller
            .finish_submit(id, &outcome, &mut self.notifications);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global quit: double Ctrl+C
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c(Instant::now());
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.copy_message = None;

        match self.state.current_view {
            View::ContactForm => self.handle_form_key(key),
            View::Products => self.handle_products_key(key),
            View::Location => self.handle_location_key(key)?,
        }
        Ok(())
    }

    fn handle_ctrl_c(&mut self, now: Instant) {
        match self.last_ctrl_c {
            Some(last) if now.saturating_duration_since(last) <= QUIT_WINDOW => {
                self.quit = true;
            }
            _ => {
                self.last_ctrl_c = Some(now);
                self.copy_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let form = &self.controller.form;
        let on_buttons = form.is_buttons_row_active();
        let active_kind = form.get_field(form.active_field()).map(|f| f.kind);

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.request_submit();
            }
            KeyCode::F(2) => self.state.open_products("cement"),
            KeyCode::F(3) => self.state.open_location(),
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Enter if on_buttons => self.request_submit(),
            KeyCode::Enter if active_kind == Some(FieldKind::Textarea) => {
                self.edit_active_field(|f| f.push_char('\n'));
            }
            KeyCode::Enter => self.move_focus(true),
            KeyCode::Left if active_kind == Some(FieldKind::Select) => {
                self.edit_active_field(|f| f.prev_option());
            }
            KeyCode::Right if active_kind == Some(FieldKind::Select) => {
                self.edit_active_field(|f| f.next_option());
            }
            KeyCode::Backspace => self.edit_active_field(|f| f.pop_char()),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.edit_active_field(|f| f.push_char(c));
            }
            _ => {}
        }
    }

    /// Move focus, validating the field being left
    fn move_focus(&mut self, forward: bool) {
        let form = &mut self.controller.form;
        let leaving = form.get_field(form.active_field()).map(|f| f.name.clone());
        if forward {
            form.next_field();
        } else {
            form.prev_field();
        }
        if let Some(name) = leaving {
            self.controller.on_blur(&name);
        }
    }

    /// Apply an edit to the focused field and clear its error
    fn edit_active_field(&mut self, edit: impl FnOnce(&mut crate::state::FormField)) {
        let Some(field) = self.controller.form.get_active_field_mut() else {
            return;
        };
        edit(field);
        let name = field.name.clone();
        self.controller.on_input(&name);
    }

    fn handle_products_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.state.prev_product(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.state.next_product(),
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            KeyCode::Enter => self.request_quote(),
            KeyCode::Esc | KeyCode::Char('q') => self.state.close_overlay(),
            _ => {}
        }
    }

    /// Close the catalog and prefill the form for the selected product
    fn request_quote(&mut self) {
        let title = self.state.selected_product().title;
        let form = &mut self.controller.form;
        if let Some(field) = form.field_mut("inquiryType") {
            field.set_text(title);
        }
        form.focus("name");
        self.controller.on_input("inquiryType");
        self.state.close_overlay();
        tracing::debug!("Quote requested for {title}");
    }

    fn handle_location_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('y') => {
                let url = LOCATION.directions_url();
                match self.copy_to_clipboard(&url) {
                    Ok(()) => self.copy_message = Some("Copied directions link".to_string()),
                    Err(e) => self
                        .state
                        .push_error(format!("Could not copy to clipboard: {e}")),
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.state.close_overlay(),
            _ => {}
        }
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportKind;
    use crate::relay::{router, MockMailer, RelayState};
    use crate::state::{
        NotificationKind, SubmissionPayload, SubmitState, CORRECT_ERRORS_MESSAGE,
        FAILURE_MESSAGE, SUBMITTING_LABEL, SUCCESS_MESSAGE,
    };
    use crate::transport::{HttpPostSender, MockMailSender};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn app_with(sender: MockMailSender) -> App {
        App::with_transport(TransportAdapter::new(
            Arc::new(sender),
            TransportKind::HttpPost,
        ))
    }

    fn idle_app() -> App {
        let mut sender = MockMailSender::new();
        sender.expect_send().never();
        app_with(sender)
    }

    /// Type a complete, valid submission into the form
    fn fill_form(app: &mut App) {
        type_text(app, "Jo");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(app, "jo@x.com");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap(); // phone
        app.handle_key(key(KeyCode::Tab)).unwrap(); // inquiry type
        type_text(app, "Hi");
    }

    fn field_value(app: &App, name: &str) -> String {
        app.controller.form.field(name).unwrap().value.clone()
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_fills_active_field() {
            let mut app = idle_app();
            type_text(&mut app, "Jo");
            assert_eq!(field_value(&app, "name"), "Jo");

            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(field_value(&app, "name"), "J");
        }

        #[test]
        fn test_leaving_empty_required_field_shows_error() {
            let mut app = idle_app();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(app.controller.error("name"), Some("This field is required"));
        }

        #[test]
        fn test_typing_clears_error() {
            let mut app = idle_app();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::BackTab)).unwrap();
            type_text(&mut app, "J");
            assert_eq!(app.controller.error("name"), None);
        }

        #[test]
        fn test_select_cycles_with_arrows() {
            let mut app = idle_app();
            app.controller.form.focus("inquiryType");
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(field_value(&app, "inquiryType"), "Cement Interlocking Bricks");
            app.handle_key(key(KeyCode::Left)).unwrap();
            app.handle_key(key(KeyCode::Left)).unwrap();
            assert_eq!(field_value(&app, "inquiryType"), "Bulk Order");
        }

        #[test]
        fn test_enter_in_message_adds_newline() {
            let mut app = idle_app();
            app.controller.form.focus("message");
            type_text(&mut app, "a");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_text(&mut app, "b");
            assert_eq!(field_value(&app, "message"), "a\nb");
        }

        #[test]
        fn test_enter_in_single_line_field_moves_on() {
            let mut app = idle_app();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.controller.form.active_field(), 1);
        }
    }

    mod quitting {
        use super::*;

        #[test]
        fn test_single_ctrl_c_does_not_quit() {
            let mut app = idle_app();
            app.handle_key(ctrl('c')).unwrap();
            assert!(!app.should_quit());
            assert!(app.copy_message.is_some());
        }

        #[test]
        fn test_double_ctrl_c_quits() {
            let mut app = idle_app();
            app.handle_key(ctrl('c')).unwrap();
            app.handle_key(ctrl('c')).unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_slow_second_ctrl_c_does_not_quit() {
            let mut app = idle_app();
            let t = Instant::now();
            app.handle_ctrl_c(t);
            app.handle_ctrl_c(t + QUIT_WINDOW + Duration::from_millis(1));
            assert!(!app.should_quit());
        }
    }

    mod polling {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_idle_poll_without_notification() {
            let app = idle_app();
            assert_eq!(app.poll_timeout(Instant::now()), IDLE_POLL);
        }

        #[test]
        fn test_poll_wakes_for_dismiss_deadline() {
            let mut app = idle_app();
            let t = Instant::now();
            app.notifications
                .show_at(SUCCESS_MESSAGE, NotificationKind::Success, t);
            app.notifications.tick(t + Duration::from_millis(100));

            let timeout = app.poll_timeout(t + Duration::from_millis(4950));
            assert_eq!(timeout, Duration::from_millis(50));
        }

        #[test]
        fn test_poll_never_negative_past_deadline() {
            let mut app = idle_app();
            let t = Instant::now();
            app.notifications
                .show_at(SUCCESS_MESSAGE, NotificationKind::Success, t);

            assert_eq!(app.poll_timeout(t + Duration::from_millis(150)), Duration::ZERO);
        }
    }

    mod overlays {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_get_quote_prefills_inquiry_type() {
            let mut app = idle_app();
            app.controller.form.focus("message");
            app.handle_key(key(KeyCode::F(2))).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.state.current_view, View::Products);

            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.state.current_view, View::ContactForm);
            assert_eq!(field_value(&app, "inquiryType"), "Classic Cement Bricks");
            assert_eq!(app.controller.form.active_field(), 0);
        }

        #[test]
        fn test_escape_closes_products_without_changes() {
            let mut app = idle_app();
            app.handle_key(key(KeyCode::F(2))).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::ContactForm);
            assert_eq!(field_value(&app, "inquiryType"), "General Inquiry");
        }

        #[test]
        fn test_typing_in_overlay_does_not_edit_form() {
            let mut app = idle_app();
            app.handle_key(key(KeyCode::F(3))).unwrap();
            type_text(&mut app, "x");
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(field_value(&app, "name"), "");
        }

        #[test]
        fn test_error_dialog_is_modal() {
            let mut app = idle_app();
            app.state.push_error("boom".to_string());
            type_text(&mut app, "x");
            assert_eq!(field_value(&app, "name"), "");

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(!app.state.has_errors());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_submit_shows_error_notification() {
            let mut app = idle_app();
            app.handle_key(ctrl('s')).unwrap();

            assert!(app.pending.is_none());
            let shown = app.notifications.current().unwrap();
            assert_eq!(shown.message, CORRECT_ERRORS_MESSAGE);
            assert_eq!(shown.kind, NotificationKind::Error);
        }

        #[tokio::test]
        async fn test_double_submit_sends_once() {
            let mut sender = MockMailSender::new();
            sender.expect_send().times(1).returning(|_| Ok(()));
            let mut app = app_with(sender);
            fill_form(&mut app);

            app.request_submit();
            assert_eq!(app.controller.state(), SubmitState::Submitting);
            assert_eq!(app.controller.button().label, SUBMITTING_LABEL);
            app.request_submit();
            app.handle_key(ctrl('s')).unwrap();

            app.finish_pending().await;

            assert_eq!(app.controller.state(), SubmitState::Idle);
            assert_eq!(app.notifications.current().unwrap().message, SUCCESS_MESSAGE);
            assert_eq!(field_value(&app, "name"), "");
        }

        #[tokio::test]
        async fn test_submit_from_button_row() {
            let mut sender = MockMailSender::new();
            sender.expect_send().times(1).returning(|_| Ok(()));
            let mut app = app_with(sender);
            fill_form(&mut app);
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert!(app.controller.form.is_buttons_row_active());

            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.finish_pending().await;

            assert_eq!(app.notifications.current().unwrap().kind, NotificationKind::Success);
        }

        #[tokio::test]
        async fn test_update_collects_finished_submission() {
            let mut sender = MockMailSender::new();
            sender
                .expect_send()
                .times(1)
                .returning(|_| Err(crate::transport::TransportError::NotConfigured("a service id")));
            let mut app = app_with(sender);
            fill_form(&mut app);
            app.request_submit();

            while app.pending.is_some() {
                tokio::task::yield_now().await;
                app.update().await;
            }

            assert_eq!(app.controller.state(), SubmitState::Idle);
            assert_eq!(app.notifications.current().unwrap().message, FAILURE_MESSAGE);
            assert_eq!(field_value(&app, "name"), "Jo");
        }
    }

    mod end_to_end {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn relay_url(mailer: MockMailer) -> String {
            let app = router(RelayState::new(Arc::new(mailer)), "/sendmail");
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{addr}/sendmail")
        }

        fn http_transport(url: &str) -> TransportAdapter {
            TransportAdapter::new(
                Arc::new(HttpPostSender::new(url).unwrap()),
                TransportKind::HttpPost,
            )
        }

        #[tokio::test]
        async fn test_form_submission_reaches_mailer() {
            let mut mailer = MockMailer::new();
            mailer
                .expect_deliver()
                .withf(|email| {
                    email.reply_to == "jo@x.com"
                        && email.subject
                            == "New Inquiry from JRB Industries Website - General Inquiry"
                        && email.body.contains("Message:\nHi\n")
                })
                .times(1)
                .returning(|_| Ok(()));
            let url = relay_url(mailer).await;

            let mut app = App::with_transport(http_transport(&url));
            fill_form(&mut app);
            app.request_submit();
            app.finish_pending().await;

            assert_eq!(app.notifications.current().unwrap().message, SUCCESS_MESSAGE);
            assert_eq!(field_value(&app, "email"), "");
            assert_eq!(app.controller.button().label, "Send Message");
        }

        #[tokio::test]
        async fn test_missing_message_is_rejected_by_relay() {
            let mut mailer = MockMailer::new();
            mailer.expect_deliver().never();
            let url = relay_url(mailer).await;

            let mut app = App::with_transport(http_transport(&url));
            fill_form(&mut app);
            let ticket = app
                .controller
                .begin_submit(&mut app.notifications)
                .unwrap();

            // Client checks bypassed so the relay sees no message
            let payload = SubmissionPayload {
                message: String::new(),
                ..ticket.payload
            };
            let outcome = app.transport.send(&payload).await;
            assert_eq!(outcome, SubmissionOutcome::Failure("request failed".to_string()));

            app.controller
                .finish_submit(ticket.id, &outcome, &mut app.notifications);

            let shown = app.notifications.current().unwrap();
            assert_eq!(shown.message, FAILURE_MESSAGE);
            assert_eq!(shown.kind, NotificationKind::Error);
            assert!(!shown.message.contains("request failed"));
            assert_eq!(app.controller.state(), SubmitState::Idle);
            assert_eq!(field_value(&app, "name"), "Jo");
        }
    }
}
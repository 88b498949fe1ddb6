//! Terminal toast for notifications
//!
//! Slides in from the right edge when a notification becomes visible and
//! dims while it is being dismissed.

use crate::state::notification::REMOVE_DELAY;
use crate::state::{Notification, NotificationKind, NotificationPhase, Presenter};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

/// Length of the slide-in animation
const SLIDE_DURATION: Duration = Duration::from_millis(250);
const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Shown {
    message: String,
    kind: NotificationKind,
    phase: NotificationPhase,
    /// When the current phase was presented
    since: Instant,
}

/// Presenter that keeps what should be drawn as a toast on the next frame
#[derive(Debug, Default)]
pub struct TerminalToast {
    shown: Option<Shown>,
}

impl Presenter for TerminalToast {
    fn present(&mut self, notification: &Notification) {
        self.shown = Some(Shown {
            message: notification.message.clone(),
            kind: notification.kind,
            phase: notification.phase,
            since: Instant::now(),
        });
    }

    fn dismiss(&mut self) {
        self.shown = None;
    }
}

/// Fraction of `total` elapsed since `since`, clamped to 0..=1
fn progress(since: Instant, now: Instant, total: Duration) -> f32 {
    let elapsed = now.saturating_duration_since(since).as_secs_f32();
    (elapsed / total.as_secs_f32()).clamp(0.0, 1.0)
}

/// Columns still hidden past the right edge during the slide-in
fn slide_offset(width: u16, progress: f32) -> u16 {
    let eased = simple_easing::cubic_out(progress);
    (f32::from(width) * (1.0 - eased)).round() as u16
}

impl TerminalToast {
    /// Whether an animation is running and the loop should redraw quickly
    pub fn is_animating(&self, now: Instant) -> bool {
        self.shown.as_ref().is_some_and(|s| match s.phase {
            NotificationPhase::Visible => progress(s.since, now, SLIDE_DURATION) < 1.0,
            NotificationPhase::Dismissing => true,
            NotificationPhase::Pending => false,
        })
    }

    /// Draw the toast in the top-right corner of `area`
    pub fn draw(&self, frame: &mut Frame, area: Rect, now: Instant) {
        let Some(shown) = &self.shown else {
            return;
        };

        let width = TOAST_WIDTH.min(area.width);
        let height = TOAST_HEIGHT.min(area.height);
        let offset = match shown.phase {
            NotificationPhase::Visible => {
                slide_offset(width, progress(shown.since, now, SLIDE_DURATION))
            }
            _ => 0,
        };
        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(width) + offset,
            y: area.y + 1,
            width: width.saturating_sub(offset),
            height,
        };
        if toast_area.width < 3 {
            return;
        }

        let (accent, icon) = match shown.kind {
            NotificationKind::Success => (Color::Green, "✓"),
            NotificationKind::Error => (Color::Red, "✗"),
        };
        let (border_style, text_style) = match shown.phase {
            NotificationPhase::Dismissing => {
                let fade = if progress(shown.since, now, REMOVE_DELAY) < 0.5 {
                    Color::Gray
                } else {
                    Color::DarkGray
                };
                let dim = Style::default().fg(fade);
                (dim, dim.add_modifier(Modifier::DIM))
            }
            _ => (Style::default().fg(accent), Style::default().fg(Color::White)),
        };

        let content = Paragraph::new(Line::from(vec![
            Span::styled(format!("{icon} "), border_style.add_modifier(Modifier::BOLD)),
            Span::styled(shown.message.as_str(), text_style),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(Color::Black)),
        );

        frame.render_widget(Clear, toast_area);
        frame.render_widget(content, toast_area);
    }
}

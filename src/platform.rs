//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Modifier for the send shortcut. Terminals on macOS rarely forward Cmd, so
/// Ctrl is used everywhere.
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Send shortcut display for help text
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Copy shortcut display in the location panel. Cmd+C reaches the app as a
/// plain `c` on macOS.
#[cfg(target_os = "macos")]
pub const COPY_HINT: &str = "c / Cmd+C";

#[cfg(not(target_os = "macos"))]
pub const COPY_HINT: &str = "c";

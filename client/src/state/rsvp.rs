//! RSVP panel presentation state.
//!
//! DESIGN
//! ======
//! The supervisor owns load progress; this module only turns its snapshots
//! into the status line, indicator visibility and expand/collapse state the
//! page shows. It has no DOM access so it can be tested natively.

use embed::{LoadState, StatusSnapshot};

#[cfg(test)]
#[path = "rsvp_test.rs"]
mod rsvp_test;

/// How long the success message stays up.
pub const SUCCESS_CLEAR_MS: u64 = 3000;

pub const MSG_LOADING: &str = "Loading form...";
pub const MSG_LOADED: &str = "Form loaded successfully!";
pub const MSG_FAILED: &str = "Unable to load RSVP form. Please try the alternative link below.";
pub const MSG_WAIT: &str = "Please wait for form to load";
pub const MSG_EXPANDED: &str = "Form expanded for better viewing";
pub const MSG_COLLAPSED: &str = "Form collapsed";

/// Styling class for the status line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Info,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormStatus {
    pub message: String,
    pub kind: StatusKind,
}

impl FormStatus {
    fn new(message: impl Into<String>, kind: StatusKind) -> Self {
        Self { message: message.into(), kind }
    }
}

/// Request to clear the status line later, if it is still the same message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoClear {
    pub seq: u64,
    pub after_ms: u64,
}

#[derive(Clone, Debug, Default)]
pub struct RsvpPanel {
    status: Option<FormStatus>,
    /// Bumped on every status change; stale auto-clears compare against it.
    status_seq: u64,
    loaded: bool,
    expanded: bool,
    show_loading: bool,
    show_error: bool,
}

impl RsvpPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> Option<&FormStatus> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether the loading indicator should be visible.
    #[must_use]
    pub fn show_loading(&self) -> bool {
        self.show_loading
    }

    /// Whether the fallback-link error block should be visible.
    #[must_use]
    pub fn show_error(&self) -> bool {
        self.show_error
    }

    /// Reflect a supervisor snapshot.
    ///
    /// Returns an [`AutoClear`] when the new message should disappear on its own.
    pub fn apply(&mut self, snapshot: &StatusSnapshot) -> Option<AutoClear> {
        self.loaded = snapshot.state == LoadState::Loaded;
        self.show_loading = matches!(snapshot.state, LoadState::Loading | LoadState::Retrying);
        self.show_error = snapshot.state == LoadState::Failed;

        match snapshot.state {
            LoadState::Idle => {
                self.set_status(None);
                None
            }
            LoadState::Loading if snapshot.retry_count == 0 => {
                self.set_status(Some(FormStatus::new(MSG_LOADING, StatusKind::Loading)));
                None
            }
            LoadState::Loading => {
                let message = format!(
                    "Retrying form load (attempt {} of {})...",
                    snapshot.attempt.map_or(1, |a| a + 1),
                    snapshot.max_attempts
                );
                self.set_status(Some(FormStatus::new(message, StatusKind::Loading)));
                None
            }
            LoadState::Retrying => {
                let message = format!(
                    "Form is taking longer than usual to load, retrying ({}/{})...",
                    snapshot.retry_count,
                    snapshot.max_attempts.saturating_sub(1)
                );
                self.set_status(Some(FormStatus::new(message, StatusKind::Loading)));
                None
            }
            LoadState::Loaded => {
                self.set_status(Some(FormStatus::new(MSG_LOADED, StatusKind::Success)));
                Some(AutoClear { seq: self.status_seq, after_ms: SUCCESS_CLEAR_MS })
            }
            LoadState::Failed => {
                self.expanded = false;
                self.set_status(Some(FormStatus::new(MSG_FAILED, StatusKind::Error)));
                None
            }
        }
    }

    /// Clear the status line if nothing replaced it since `ticket` was issued.
    pub fn auto_clear(&mut self, ticket: AutoClear) -> bool {
        if ticket.seq != self.status_seq || self.status.is_none() {
            return false;
        }
        self.set_status(None);
        true
    }

    /// Flip expand/collapse. Returns the new expanded flag, or `None` when
    /// expanding was refused because the form has not loaded.
    pub fn toggle(&mut self) -> Option<bool> {
        if !self.loaded && !self.expanded {
            self.set_status(Some(FormStatus::new(MSG_WAIT, StatusKind::Loading)));
            return None;
        }
        self.expanded = !self.expanded;
        let status = if self.expanded {
            FormStatus::new(MSG_EXPANDED, StatusKind::Success)
        } else {
            FormStatus::new(MSG_COLLAPSED, StatusKind::Info)
        };
        self.set_status(Some(status));
        Some(self.expanded)
    }

    fn set_status(&mut self, status: Option<FormStatus>) {
        self.status = status;
        self.status_seq += 1;
    }
}

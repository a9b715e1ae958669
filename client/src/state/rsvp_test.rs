use embed::LoadError;

use super::*;

fn snapshot(state: LoadState, retry_count: u32, attempt: Option<u32>) -> StatusSnapshot {
    StatusSnapshot { state, retry_count, attempt, max_attempts: 4, error: None, at_ms: 0 }
}

fn message(panel: &RsvpPanel) -> Option<&str> {
    panel.status().map(|s| s.message.as_str())
}

// =============================================================
// apply
// =============================================================

#[test]
fn first_attempt_shows_loading() {
    let mut panel = RsvpPanel::new();
    assert_eq!(panel.apply(&snapshot(LoadState::Loading, 0, Some(0))), None);
    assert_eq!(message(&panel), Some(MSG_LOADING));
    assert_eq!(panel.status().unwrap().kind, StatusKind::Loading);
    assert!(panel.show_loading());
    assert!(!panel.show_error());
}

#[test]
fn retry_progress_is_reported() {
    let mut panel = RsvpPanel::new();
    panel.apply(&snapshot(LoadState::Retrying, 1, Some(0)));
    assert_eq!(message(&panel), Some("Form is taking longer than usual to load, retrying (1/3)..."));

    panel.apply(&snapshot(LoadState::Loading, 1, Some(1)));
    assert_eq!(message(&panel), Some("Retrying form load (attempt 2 of 4)..."));
    assert!(panel.show_loading());
}

#[test]
fn loaded_requests_auto_clear() {
    let mut panel = RsvpPanel::new();
    panel.apply(&snapshot(LoadState::Loading, 0, Some(0)));
    let ticket = panel.apply(&snapshot(LoadState::Loaded, 0, Some(0))).unwrap();

    assert_eq!(ticket.after_ms, SUCCESS_CLEAR_MS);
    assert_eq!(message(&panel), Some(MSG_LOADED));
    assert!(panel.is_loaded());
    assert!(!panel.show_loading());

    assert!(panel.auto_clear(ticket));
    assert_eq!(panel.status(), None);
}

#[test]
fn stale_auto_clear_keeps_newer_message() {
    let mut panel = RsvpPanel::new();
    let ticket = panel.apply(&snapshot(LoadState::Loaded, 0, Some(0))).unwrap();
    panel.toggle();

    assert!(!panel.auto_clear(ticket));
    assert_eq!(message(&panel), Some(MSG_EXPANDED));
}

#[test]
fn failure_shows_fallback_and_collapses() {
    let mut panel = RsvpPanel::new();
    panel.apply(&snapshot(LoadState::Loaded, 0, Some(0)));
    panel.toggle();
    assert!(panel.is_expanded());

    let mut failed = snapshot(LoadState::Failed, 3, Some(3));
    failed.error = Some(LoadError::Timeout { attempt: 3, timeout_ms: 5000 });
    panel.apply(&failed);

    assert_eq!(message(&panel), Some(MSG_FAILED));
    assert_eq!(panel.status().unwrap().kind, StatusKind::Error);
    assert!(panel.show_error());
    assert!(!panel.is_expanded());
    assert!(!panel.is_loaded());
}

#[test]
fn idle_clears_status() {
    let mut panel = RsvpPanel::new();
    panel.apply(&snapshot(LoadState::Loading, 0, Some(0)));
    panel.apply(&snapshot(LoadState::Idle, 0, None));
    assert_eq!(panel.status(), None);
    assert!(!panel.show_loading());
}

// =============================================================
// toggle
// =============================================================

#[test]
fn toggle_refuses_to_expand_before_load() {
    let mut panel = RsvpPanel::new();
    assert_eq!(panel.toggle(), None);
    assert_eq!(message(&panel), Some(MSG_WAIT));
    assert!(!panel.is_expanded());
}

#[test]
fn toggle_expands_and_collapses_after_load() {
    let mut panel = RsvpPanel::new();
    panel.apply(&snapshot(LoadState::Loaded, 0, Some(0)));

    assert_eq!(panel.toggle(), Some(true));
    assert_eq!(panel.status().unwrap().kind, StatusKind::Success);
    assert_eq!(panel.toggle(), Some(false));
    assert_eq!(message(&panel), Some(MSG_COLLAPSED));
    assert_eq!(panel.status().unwrap().kind.css_class(), "info");
}

#[test]
fn collapse_allowed_after_reload_starts() {
    let mut panel = RsvpPanel::new();
    panel.apply(&snapshot(LoadState::Loaded, 0, Some(0)));
    panel.toggle();
    panel.apply(&snapshot(LoadState::Loading, 0, Some(0)));

    assert_eq!(panel.toggle(), Some(false));
}

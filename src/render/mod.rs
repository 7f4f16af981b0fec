//! Text presentation of the view state.
//!
//! Pure functions from state to strings; the binary decides where they go.

use std::fmt::Write;

use crate::actions::enqueue::VERBATIM_PREFIX;
use crate::actions::{Notification, NotificationKind, SubmitPhase};
use crate::state::{StatusSnapshot, ViewState};

/// Render the status section.
///
/// Loading line, error line and snapshot are independent: a stale snapshot
/// is shown together with the error that followed it.
pub fn render_status(view: &ViewState) -> String {
    let mut out = String::from("Status\n");
    if view.is_loading {
        out.push_str("  Loading…\n");
    }
    if let Some(error) = &view.last_error {
        let _ = writeln!(out, "  Error: {}", error);
    }
    if let Some(snapshot) = &view.snapshot {
        out.push_str(&render_snapshot(snapshot));
    }
    out
}

fn render_snapshot(snapshot: &StatusSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Served by:     {}", snapshot.served_by);
    let _ = writeln!(out, "  Session ID:    {}", snapshot.session_id);
    let _ = writeln!(out, "  Session count: {}", snapshot.session_count);
    let _ = writeln!(out, "  Global count:  {}", snapshot.global_count);
    if let Some(noise) = snapshot.local_noise {
        let _ = writeln!(out, "  Local noise:   {}", noise);
    }
    out
}

/// Render one notification line.
pub fn render_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("[ok] {}", notification.message),
        NotificationKind::Failure => format!("[!!] {}", notification.message),
    }
}

/// Enqueue activity line, if any submit is in flight.
pub fn render_enqueue_phase(phase: SubmitPhase) -> Option<String> {
    match phase {
        SubmitPhase::Idle => None,
        SubmitPhase::Submitting(n) => Some(format!("Submitting ({})…", n)),
    }
}

/// Header shown once when the console starts.
pub fn render_banner(base_url: &str, interval_ms: u64, job: &str) -> String {
    format!(
        "Watching {} every {} ms.\n\
         Type a job name and press Enter to enqueue it (blank line resubmits {:?}; \
         prefix with '{}' to send the rest verbatim, even empty). Ctrl-C to quit.\n",
        base_url, interval_ms, job, VERBATIM_PREFIX
    )
}

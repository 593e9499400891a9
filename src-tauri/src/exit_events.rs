use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{append_shutdown_log, ShellState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitDecision {
    Allow,
    KeepResident,
}

/// `explicit_exit` is an exit with a code (tray quit, restart); without one the
/// request means the last window went away.
pub(crate) fn decide_exit_request(
    explicit_exit: bool,
    quitting: bool,
    keep_resident_without_windows: bool,
) -> ExitDecision {
    if explicit_exit || quitting || !keep_resident_without_windows {
        ExitDecision::Allow
    } else {
        ExitDecision::KeepResident
    }
}

pub(crate) fn handle_exit_requested(
    app_handle: &AppHandle,
    code: Option<i32>,
    api: &ExitRequestApi,
) {
    let state = app_handle.state::<ShellState>();
    match decide_exit_request(
        code.is_some(),
        state.is_quitting(),
        cfg!(target_os = "macos"),
    ) {
        ExitDecision::KeepResident => {
            api.prevent_exit();
            append_shutdown_log("all windows closed; staying resident");
        }
        ExitDecision::Allow => {
            state.mark_quitting();
            append_shutdown_log(&format!("exit requested (code={code:?}); quitting"));
        }
    }
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    let polling_stopped = state.stop_polling();
    let restart_cancelled = state.cancel_pending_restart();
    append_shutdown_log(&format!(
        "desktop process exiting: polling_stopped={polling_stopped} pending_restart_cancelled={restart_cancelled}"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_window_closed_quits_outside_macos() {
        assert_eq!(
            decide_exit_request(false, false, false),
            ExitDecision::Allow
        );
    }

    #[test]
    fn last_window_closed_keeps_macos_resident() {
        assert_eq!(
            decide_exit_request(false, false, true),
            ExitDecision::KeepResident
        );
    }

    #[test]
    fn explicit_exit_or_quit_intent_always_allows() {
        assert_eq!(decide_exit_request(true, false, true), ExitDecision::Allow);
        assert_eq!(decide_exit_request(false, true, true), ExitDecision::Allow);
    }
}

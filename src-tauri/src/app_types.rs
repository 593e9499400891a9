use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};
use tauri::{async_runtime::JoinHandle, menu::MenuItem};

use crate::{tray_actions::TrayMenuAction, update_notifier::UpdateNotifier};

#[derive(Clone)]
pub(crate) struct TrayMenuState {
    pub(crate) toggle_item: MenuItem<tauri::Wry>,
    pub(crate) reload_item: MenuItem<tauri::Wry>,
    pub(crate) auto_update_check_item: MenuItem<tauri::Wry>,
    pub(crate) quit_item: MenuItem<tauri::Wry>,
}

impl TrayMenuState {
    pub(crate) fn item(&self, action: TrayMenuAction) -> &MenuItem<tauri::Wry> {
        match action {
            TrayMenuAction::ToggleWindow => &self.toggle_item,
            TrayMenuAction::ReloadWindow => &self.reload_item,
            TrayMenuAction::ToggleAutoUpdateCheck => &self.auto_update_check_item,
            TrayMenuAction::Quit => &self.quit_item,
        }
    }
}

/// Holds at most one background task that can be aborted from elsewhere.
#[derive(Default)]
pub(crate) struct TaskSlot {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TaskSlot {
    /// Stores `handle`, aborting whatever task the slot held before.
    pub(crate) fn replace(&self, handle: JoinHandle<()>) {
        let previous = match self.handle.lock() {
            Ok(mut guard) => guard.replace(handle),
            Err(_) => {
                handle.abort();
                return;
            }
        };
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Aborts the held task. Returns false when the slot was already empty.
    pub(crate) fn cancel(&self) -> bool {
        let taken = match self.handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        match taken {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_occupied(&self) -> bool {
        self.handle
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

impl fmt::Debug for TaskSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSlot")
            .field("occupied", &self.is_occupied())
            .finish()
    }
}

/// Process-wide shell state shared by window, lifecycle and update handlers.
#[derive(Debug, Default)]
pub(crate) struct ShellState {
    quitting: AtomicBool,
    pub(crate) notifier: UpdateNotifier,
    pub(crate) poll_task: TaskSlot,
    pub(crate) restart_task: TaskSlot,
}

impl ShellState {
    pub(crate) fn mark_quitting(&self) {
        self.quitting.store(true, Ordering::Release);
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::Acquire)
    }

    /// Aborts the update polling task. Safe to call repeatedly.
    pub(crate) fn stop_polling(&self) -> bool {
        self.poll_task.cancel()
    }

    pub(crate) fn cancel_pending_restart(&self) -> bool {
        self.restart_task.cancel()
    }
}

#[derive(Debug)]
pub(crate) struct AutoUpdateCheckState {
    pub(crate) enabled: Mutex<bool>,
}

impl AutoUpdateCheckState {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled: Mutex::new(enabled),
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.lock().map(|guard| *guard).unwrap_or(true)
    }

    pub(crate) fn set(&self, enabled: bool) {
        if let Ok(mut guard) = self.enabled.lock() {
            *guard = enabled;
        }
    }

    pub(crate) fn toggle(&self) -> bool {
        match self.enabled.lock() {
            Ok(mut guard) => {
                *guard = !*guard;
                *guard
            }
            Err(_) => true,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateStateSnapshot {
    pub(crate) current_version: String,
    pub(crate) channel: String,
    pub(crate) polling: bool,
    pub(crate) available_notified: bool,
    pub(crate) not_available_notified: bool,
    pub(crate) download_handled: bool,
    pub(crate) restart_pending: bool,
    pub(crate) auto_update_check: bool,
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        thread,
        time::Duration,
    };

    use super::*;

    #[test]
    fn shell_state_quit_intent_defaults_to_false() {
        let state = ShellState::default();
        assert!(!state.is_quitting());
        state.mark_quitting();
        assert!(state.is_quitting());
    }

    #[test]
    fn task_slot_cancel_aborts_task_and_empties_slot() {
        let slot = TaskSlot::default();
        let fired = Arc::new(AtomicBool::new(false));
        let task_fired = Arc::clone(&fired);
        slot.replace(tauri::async_runtime::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            task_fired.store(true, Ordering::SeqCst);
        }));
        assert!(slot.is_occupied());

        assert!(slot.cancel());
        assert!(!slot.is_occupied());
        assert!(!slot.cancel());

        thread::sleep(Duration::from_millis(300));
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn task_slot_replace_aborts_previous_task() {
        let slot = TaskSlot::default();
        let first_fired = Arc::new(AtomicBool::new(false));
        let task_fired = Arc::clone(&first_fired);
        slot.replace(tauri::async_runtime::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            task_fired.store(true, Ordering::SeqCst);
        }));
        slot.replace(tauri::async_runtime::spawn(async {}));

        thread::sleep(Duration::from_millis(300));
        assert!(!first_fired.load(Ordering::SeqCst));
        assert!(slot.is_occupied());
    }

    #[test]
    fn shell_state_stop_polling_is_idempotent() {
        let state = ShellState::default();
        assert!(!state.stop_polling());
        state.poll_task.replace(tauri::async_runtime::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }));
        assert!(state.stop_polling());
        assert!(!state.stop_polling());
        assert!(!state.cancel_pending_restart());
    }

    #[test]
    fn auto_update_check_state_toggles() {
        let state = AutoUpdateCheckState::new(true);
        assert!(!state.toggle());
        assert!(!state.is_enabled());
        state.set(true);
        assert!(state.is_enabled());
    }
}

use tauri::{AppHandle, Manager};

use crate::{
    append_update_log, tray_menu_handler, update_channel::UpdateChannel, AutoUpdateCheckState,
    BridgeResult, ShellState, UpdateStateSnapshot,
};

#[tauri::command]
pub(crate) fn desktop_bridge_is_desktop_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) fn desktop_bridge_get_update_state(app_handle: AppHandle) -> UpdateStateSnapshot {
    let current_version = app_handle.package_info().version.to_string();
    let channel = UpdateChannel::from_version(&current_version);
    let state = app_handle.state::<ShellState>();
    let auto_update_check = app_handle
        .try_state::<AutoUpdateCheckState>()
        .map(|state| state.is_enabled())
        .unwrap_or(true);

    UpdateStateSnapshot {
        current_version,
        channel: channel.to_string(),
        polling: state.poll_task.is_occupied(),
        available_notified: state.notifier.available_shown(),
        not_available_notified: state.notifier.not_available_shown(),
        download_handled: state.notifier.downloaded_handled(),
        restart_pending: state.restart_task.is_occupied(),
        auto_update_check,
    }
}

#[tauri::command]
pub(crate) fn desktop_bridge_cancel_pending_restart(app_handle: AppHandle) -> BridgeResult {
    let state = app_handle.state::<ShellState>();
    if state.cancel_pending_restart() {
        append_update_log("pending install-and-restart cancelled from desktop bridge");
        BridgeResult::ok()
    } else {
        BridgeResult::failed("No restart is pending.")
    }
}

#[tauri::command]
pub(crate) fn desktop_bridge_set_auto_update_check(
    app_handle: AppHandle,
    enabled: bool,
) -> BridgeResult {
    app_handle.state::<AutoUpdateCheckState>().set(enabled);
    match tray_menu_handler::persist_auto_update_check(&app_handle, enabled) {
        Ok(()) => BridgeResult::ok(),
        Err(error) => BridgeResult::failed(error),
    }
}

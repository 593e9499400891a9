use tauri::{AppHandle, Manager};

use crate::{
    append_desktop_log, append_shutdown_log, desktop_state, runtime_paths, tray_actions,
    tray_labels, window_actions, AutoUpdateCheckState, ShellState,
};

pub fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match tray_actions::TrayMenuAction::from_menu_id(menu_id) {
        Some(tray_actions::TrayMenuAction::ToggleWindow) => {
            window_actions::toggle_main_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::ReloadWindow) => {
            window_actions::reload_main_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::ToggleAutoUpdateCheck) => {
            let auto_update_state = app_handle.state::<AutoUpdateCheckState>();
            let enabled = auto_update_state.toggle();
            let _ = persist_auto_update_check(app_handle, enabled);
        }
        Some(tray_actions::TrayMenuAction::Quit) => {
            let state = app_handle.state::<ShellState>();
            state.mark_quitting();
            append_shutdown_log("tray quit requested, exiting desktop process");
            app_handle.exit(0);
        }
        None => {}
    }
}

pub(crate) fn persist_auto_update_check(app_handle: &AppHandle, enabled: bool) -> Result<(), String> {
    let root_dir = runtime_paths::default_packaged_root_dir();
    let result = desktop_state::write_cached_auto_update_check_enabled(
        enabled,
        root_dir.as_deref(),
        append_desktop_log,
    );
    match &result {
        Ok(()) => append_desktop_log(&format!(
            "auto update check {}",
            if enabled { "enabled" } else { "disabled" }
        )),
        Err(error) => append_desktop_log(&format!(
            "failed to persist auto update check setting: {error}"
        )),
    }
    tray_labels::update_tray_menu_labels(app_handle, append_desktop_log);
    result
}

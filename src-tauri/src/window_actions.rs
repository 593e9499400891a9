use tauri::{AppHandle, Manager};

use crate::{main_window, tray_labels, MAIN_WINDOW_LABEL};

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    main_window::show_main_window(app_handle, &log);
    tray_labels::update_tray_menu_labels_with_visibility(app_handle, Some(true), log);
}

pub fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    main_window::hide_main_window(app_handle, &log);
    tray_labels::update_tray_menu_labels_with_visibility(app_handle, Some(false), log);
}

pub fn toggle_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy,
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("toggle_main_window skipped: main window not found");
        return;
    };

    match window.is_visible() {
        Ok(true) => hide_main_window(app_handle, log),
        Ok(false) => show_main_window(app_handle, log),
        Err(error) => log(&format!(
            "failed to read main window visibility in toggle_main_window: {error}"
        )),
    }
}

pub fn reload_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    main_window::reload_main_window(app_handle, log);
}

/// Reactivation (dock click): recreate the window when none exist, otherwise
/// bring the hidden one back.
pub fn activate_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy,
{
    let open_window_count = app_handle.webview_windows().len();
    if main_window::should_create_window_on_activate(open_window_count) {
        match main_window::create_main_window(app_handle, log) {
            Ok(_) => tray_labels::update_tray_menu_labels_with_visibility(app_handle, Some(true), log),
            Err(error) => log(&format!("failed to recreate main window on activate: {error}")),
        }
        return;
    }

    show_main_window(app_handle, log);
}

use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle, Manager,
};

use crate::{
    append_desktop_log,
    tray_actions::TrayMenuAction,
    tray_labels::{self, TrayLabelContext},
    tray_menu_handler, window_actions, TrayMenuState, MAIN_WINDOW_TITLE, TRAY_ID,
};

fn build_menu_item(
    app_handle: &AppHandle,
    action: TrayMenuAction,
    context: TrayLabelContext,
) -> Result<MenuItem<tauri::Wry>, String> {
    MenuItem::with_id(
        app_handle,
        action.menu_id(),
        tray_labels::label_for(action, context),
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray menu item {}: {error}", action.menu_id()))
}

fn on_tray_icon_event(app_handle: &AppHandle, event: TrayIconEvent) {
    let TrayIconEvent::Click {
        button,
        button_state: MouseButtonState::Up,
        ..
    } = event
    else {
        return;
    };

    tray_labels::update_tray_menu_labels(app_handle, append_desktop_log);
    if button == MouseButton::Left {
        window_actions::toggle_main_window(app_handle, append_desktop_log);
    }
}

pub fn setup_tray(app_handle: &AppHandle) -> Result<(), String> {
    let context = TrayLabelContext::read(app_handle, None);
    let tray_state = TrayMenuState {
        toggle_item: build_menu_item(app_handle, TrayMenuAction::ToggleWindow, context)?,
        reload_item: build_menu_item(app_handle, TrayMenuAction::ReloadWindow, context)?,
        auto_update_check_item: build_menu_item(
            app_handle,
            TrayMenuAction::ToggleAutoUpdateCheck,
            context,
        )?,
        quit_item: build_menu_item(app_handle, TrayMenuAction::Quit, context)?,
    };
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create tray separator menu item: {error}"))?;

    let menu = Menu::with_items(
        app_handle,
        &[
            &tray_state.toggle_item,
            &tray_state.reload_item,
            &tray_state.auto_update_check_item,
            &separator,
            &tray_state.quit_item,
        ],
    )
    .map_err(|error| format!("Failed to build tray menu: {error}"))?;

    if !app_handle.manage(tray_state) {
        append_desktop_log("tray menu state already exists, skipping manage");
    }

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(MAIN_WINDOW_TITLE)
        .icon(tauri::include_image!("./icons/tray.png"))
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| {
            tray_menu_handler::handle_tray_menu_event(app, event.id().as_ref())
        })
        .on_tray_icon_event(|tray, event| on_tray_icon_event(tray.app_handle(), event));

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .build(app_handle)
        .map_err(|error| format!("Failed to create tray icon: {error}"))?;
    Ok(())
}

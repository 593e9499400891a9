use tauri::{AppHandle, Manager};

use crate::{tray_actions::TrayMenuAction, AutoUpdateCheckState, TrayMenuState, MAIN_WINDOW_LABEL};

/// Inputs the tray texts depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayLabelContext {
    pub window_visible: bool,
    pub auto_update_check_enabled: bool,
}

impl TrayLabelContext {
    pub fn read(app_handle: &AppHandle, visible_override: Option<bool>) -> Self {
        let window_visible = visible_override.unwrap_or_else(|| {
            app_handle
                .get_webview_window(MAIN_WINDOW_LABEL)
                .and_then(|window| window.is_visible().ok())
                .unwrap_or(true)
        });
        let auto_update_check_enabled = app_handle
            .try_state::<AutoUpdateCheckState>()
            .map(|state| state.is_enabled())
            .unwrap_or(true);

        Self {
            window_visible,
            auto_update_check_enabled,
        }
    }
}

pub fn label_for(action: TrayMenuAction, context: TrayLabelContext) -> &'static str {
    match action {
        TrayMenuAction::ToggleWindow if context.window_visible => "Hide Update Shell",
        TrayMenuAction::ToggleWindow => "Show Update Shell",
        TrayMenuAction::ReloadWindow => "Reload",
        TrayMenuAction::ToggleAutoUpdateCheck if context.auto_update_check_enabled => {
            "Auto Update Check: On"
        }
        TrayMenuAction::ToggleAutoUpdateCheck => "Auto Update Check: Off",
        TrayMenuAction::Quit => "Quit",
    }
}

pub fn update_tray_menu_labels<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    update_tray_menu_labels_with_visibility(app_handle, None, log);
}

pub fn update_tray_menu_labels_with_visibility<F>(
    app_handle: &AppHandle,
    visible_override: Option<bool>,
    log: F,
) where
    F: Fn(&str),
{
    let Some(tray_state) = app_handle.try_state::<TrayMenuState>() else {
        return;
    };

    let context = TrayLabelContext::read(app_handle, visible_override);
    for action in TrayMenuAction::ALL {
        if let Err(error) = tray_state.item(action).set_text(label_for(action, context)) {
            log(&format!(
                "failed to update tray menu text for {}: {}",
                action.menu_id(),
                error
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISIBLE_WITH_CHECKS: TrayLabelContext = TrayLabelContext {
        window_visible: true,
        auto_update_check_enabled: true,
    };
    const HIDDEN_WITHOUT_CHECKS: TrayLabelContext = TrayLabelContext {
        window_visible: false,
        auto_update_check_enabled: false,
    };

    #[test]
    fn toggle_label_reflects_window_visibility() {
        assert_eq!(
            label_for(TrayMenuAction::ToggleWindow, VISIBLE_WITH_CHECKS),
            "Hide Update Shell"
        );
        assert_eq!(
            label_for(TrayMenuAction::ToggleWindow, HIDDEN_WITHOUT_CHECKS),
            "Show Update Shell"
        );
    }

    #[test]
    fn auto_update_check_label_reflects_setting() {
        assert_eq!(
            label_for(TrayMenuAction::ToggleAutoUpdateCheck, VISIBLE_WITH_CHECKS),
            "Auto Update Check: On"
        );
        assert_eq!(
            label_for(TrayMenuAction::ToggleAutoUpdateCheck, HIDDEN_WITHOUT_CHECKS),
            "Auto Update Check: Off"
        );
    }

    #[test]
    fn static_labels_ignore_context() {
        for context in [VISIBLE_WITH_CHECKS, HIDDEN_WITHOUT_CHECKS] {
            assert_eq!(label_for(TrayMenuAction::ReloadWindow, context), "Reload");
            assert_eq!(label_for(TrayMenuAction::Quit, context), "Quit");
        }
    }
}

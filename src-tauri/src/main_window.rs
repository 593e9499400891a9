use tauri::{AppHandle, Manager, WebviewWindow, WebviewWindowBuilder};

use crate::{
    runtime_paths, shell_config::ShellConfig, MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL,
    MAIN_WINDOW_TITLE, MAIN_WINDOW_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseDecision {
    /// Let the host destroy the window and release the handle.
    Release,
    /// Keep the process resident: cancel the close and hide the window.
    Hide,
}

pub(crate) fn decide_close_request(quitting: bool) -> CloseDecision {
    if quitting {
        CloseDecision::Release
    } else {
        CloseDecision::Hide
    }
}

/// Hidden windows still count as open, so only an empty window set triggers recreation.
pub(crate) fn should_create_window_on_activate(open_window_count: usize) -> bool {
    open_window_count == 0
}

pub(crate) fn create_main_window<F>(app_handle: &AppHandle, log: F) -> Result<WebviewWindow, String>
where
    F: Fn(&str),
{
    if let Some(existing) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        log("create_main_window skipped: main window already exists");
        return Ok(existing);
    }

    let config = app_handle
        .try_state::<ShellConfig>()
        .map(|state| state.inner().clone())
        .unwrap_or_else(ShellConfig::from_env);
    let source = config.content_source(&runtime_paths::workspace_root_dir())?;
    log(&format!("creating main window with {}", source.describe()));

    WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, source.to_webview_url())
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .visible(true)
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))
}

pub(crate) fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("show_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

pub(crate) fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("hide_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.hide() {
        log(&format!("failed to hide main window: {error}"));
    }
}

pub(crate) fn reload_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("reload_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.reload() {
        log(&format!("failed to reload main window: {error}"));
    }
}

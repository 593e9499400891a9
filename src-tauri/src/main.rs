#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_helpers;
mod app_runtime;
mod app_types;
mod content_source;
mod desktop_bridge_commands;
mod desktop_state;
mod exit_events;
mod logging;
mod main_window;
mod runtime_paths;
mod shell_config;
mod tray_actions;
mod tray_labels;
mod tray_menu_handler;
mod tray_setup;
mod update_channel;
mod update_notifier;
mod update_poller;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_helpers::{
    append_desktop_log, append_shutdown_log, append_startup_log, append_update_log,
};
pub(crate) use app_types::{
    AutoUpdateCheckState, BridgeResult, ShellState, TrayMenuState, UpdateStateSnapshot,
};

fn main() {
    app_runtime::run();
}

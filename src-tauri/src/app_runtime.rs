use tauri::{Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log, desktop_state, exit_events,
    main_window::{self, CloseDecision},
    runtime_paths,
    shell_config::ShellConfig,
    tray_setup,
    update_channel::UpdateChannel,
    update_poller, window_actions, AutoUpdateCheckState, ShellState, DESKTOP_LOG_FILE,
    MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    let packaged_root_dir = runtime_paths::default_packaged_root_dir();
    let auto_update_check_enabled =
        desktop_state::read_cached_auto_update_check_enabled(packaged_root_dir.as_deref())
            .unwrap_or(true);
    let shell_config = ShellConfig::from_env();

    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        crate::logging::resolve_desktop_log_path(packaged_root_dir, DESKTOP_LOG_FILE).display()
    ));
    append_startup_log(&format!(
        "shell channel: {} (development={})",
        shell_config.shell_channel.as_deref().unwrap_or("<unset>"),
        shell_config.is_development()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            append_desktop_log("second instance launched; activating main window");
            window_actions::activate_main_window(app, append_desktop_log);
        }))
        .plugin(tauri_plugin_updater::Builder::new().build())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_process::init())
        .manage(ShellState::default())
        .manage(AutoUpdateCheckState::new(auto_update_check_enabled))
        .manage(shell_config)
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::desktop_bridge_is_desktop_runtime,
            crate::desktop_bridge_commands::desktop_bridge_get_update_state,
            crate::desktop_bridge_commands::desktop_bridge_cancel_pending_restart,
            crate::desktop_bridge_commands::desktop_bridge_set_auto_update_check,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::CloseRequested { api, .. } = event {
                let app_handle = window.app_handle();
                let state = app_handle.state::<ShellState>();
                match main_window::decide_close_request(state.is_quitting()) {
                    CloseDecision::Release => {
                        append_desktop_log("main window close allowed: application is quitting");
                    }
                    CloseDecision::Hide => {
                        api.prevent_close();
                        window_actions::hide_main_window(app_handle, append_desktop_log);
                    }
                }
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            main_window::create_main_window(&app_handle, append_startup_log)?;

            if let Err(error) = tray_setup::setup_tray(&app_handle) {
                append_startup_log(&format!("failed to initialize tray: {error}"));
            }

            let current_version = app_handle.package_info().version.to_string();
            let channel = UpdateChannel::from_version(&current_version);
            append_startup_log(&format!(
                "update channel resolved: version={current_version} channel={channel}"
            ));
            update_poller::start_update_polling(&app_handle, channel);

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                exit_events::handle_exit_requested(app_handle, code, &api);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                window_actions::activate_main_window(app_handle, append_desktop_log);
            }
            _ => {}
        });
}

#[cfg(test)]
mod tests {
    const TAURI_CONFIG: &str = include_str!("../tauri.conf.json");
    const PACKAGED_INDEX: &str = include_str!("../../dist/index.html");

    #[test]
    fn packaged_content_gets_global_tauri_api() {
        let config: serde_json::Value =
            serde_json::from_str(TAURI_CONFIG).expect("tauri.conf.json parses");
        assert_eq!(config["app"]["withGlobalTauri"], true);
        assert!(PACKAGED_INDEX.contains("window.__TAURI__"));
    }

    #[test]
    fn packaged_content_calls_registered_bridge_commands() {
        for command in [
            "desktop_bridge_get_update_state",
            "desktop_bridge_set_auto_update_check",
            "desktop_bridge_cancel_pending_restart",
        ] {
            assert!(
                PACKAGED_INDEX.contains(command),
                "index.html does not invoke {command}"
            );
        }
    }
}

use std::time::{Duration, Instant};
use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_updater::{Update, Updater, UpdaterExt};
use tokio::time::MissedTickBehavior;

use crate::{
    append_update_log,
    shell_config::ShellConfig,
    update_channel::{self, UpdateChannel},
    update_notifier::{TargetPlatform, UpdateDialog},
    AutoUpdateCheckState, ShellState,
};

fn build_channel_updater(
    app_handle: &AppHandle,
    channel: UpdateChannel,
    endpoint_template: &str,
) -> Result<Updater, String> {
    let endpoint = update_channel::feed_endpoint(endpoint_template, channel)?;
    app_handle
        .updater_builder()
        .endpoints(vec![endpoint])
        .map_err(|error| format!("Failed to configure update endpoint: {error}"))?
        .build()
        .map_err(|error| format!("Failed to initialize updater: {error}"))
}

/// Starts the background update check loop for `channel`. The first check
/// runs one interval after startup; the loop is aborted on the first terminal
/// outcome.
pub(crate) fn start_update_polling(app_handle: &AppHandle, channel: UpdateChannel) {
    let config = app_handle
        .try_state::<ShellConfig>()
        .map(|state| state.inner().clone())
        .unwrap_or_else(ShellConfig::from_env);
    let interval = config.update_check_interval;
    let endpoint_template = config.update_endpoint_template;
    append_update_log(&format!(
        "starting update polling: channel={} interval_ms={} endpoint={}",
        channel,
        interval.as_millis(),
        endpoint_template
    ));

    let task_app = app_handle.clone();
    let handle = tauri::async_runtime::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let enabled = task_app
                .try_state::<AutoUpdateCheckState>()
                .map(|state| state.is_enabled())
                .unwrap_or(true);
            if enabled {
                check_once(&task_app, channel, &endpoint_template).await;
            }
        }
    });
    app_handle.state::<ShellState>().poll_task.replace(handle);
}

async fn check_once(app_handle: &AppHandle, channel: UpdateChannel, endpoint_template: &str) {
    let current_version = app_handle.package_info().version.to_string();
    let updater = match build_channel_updater(app_handle, channel, endpoint_template) {
        Ok(updater) => updater,
        Err(error) => {
            append_update_log(&error);
            return;
        }
    };

    let check_started = Instant::now();
    match updater.check().await {
        Ok(Some(update)) => {
            append_update_log(&format!(
                "check finished: has_update=true channel={} current_version={} latest_version={} elapsed_ms={}",
                channel,
                current_version,
                update.version,
                check_started.elapsed().as_millis()
            ));
            handle_update_available(app_handle, channel, update);
        }
        Ok(None) => {
            append_update_log(&format!(
                "check finished: has_update=false channel={} current_version={} elapsed_ms={}",
                channel,
                current_version,
                check_started.elapsed().as_millis()
            ));
            handle_update_not_available(app_handle, channel);
        }
        Err(error) => {
            // Missing feeds and offline machines land here; keep polling.
            append_update_log(&format!(
                "check failed (silent): channel={} current_version={} elapsed_ms={} error={}",
                channel,
                current_version,
                check_started.elapsed().as_millis(),
                error
            ));
        }
    }
}

fn show_update_dialog(app_handle: &AppHandle, dialog: &UpdateDialog) {
    append_update_log(&format!("showing update dialog: {}", dialog.title));
    app_handle
        .dialog()
        .message(dialog.body_text())
        .title(dialog.title.clone())
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::Ok)
        .show(|_| {});
}

/// Stops polling, then claims the one-shot "available" outcome.
fn claim_update_available(
    state: &ShellState,
    channel: UpdateChannel,
    platform: TargetPlatform,
    release_notes: Option<&str>,
    release_name: &str,
) -> Option<UpdateDialog> {
    state.stop_polling();
    state
        .notifier
        .on_update_available(channel, platform, release_notes, release_name)
}

fn claim_update_not_available(state: &ShellState, channel: UpdateChannel) -> Option<UpdateDialog> {
    state.stop_polling();
    state.notifier.on_update_not_available(channel)
}

/// Returns the restart delay for the first download only.
fn claim_update_downloaded(state: &ShellState) -> Option<Duration> {
    state.stop_polling();
    state.notifier.on_update_downloaded()
}

fn handle_update_available(app_handle: &AppHandle, channel: UpdateChannel, update: Update) {
    let state = app_handle.state::<ShellState>();
    let Some(dialog) = claim_update_available(
        &state,
        channel,
        TargetPlatform::current(),
        update.body.as_deref(),
        &update.version,
    ) else {
        append_update_log("update-available already handled; ignoring");
        return;
    };

    show_update_dialog(app_handle, &dialog);
    spawn_update_download(app_handle, update);
}

fn handle_update_not_available(app_handle: &AppHandle, channel: UpdateChannel) {
    let state = app_handle.state::<ShellState>();
    match claim_update_not_available(&state, channel) {
        Some(dialog) => show_update_dialog(app_handle, &dialog),
        None => append_update_log("update-not-available already handled; ignoring"),
    }
}

fn spawn_update_download(app_handle: &AppHandle, update: Update) {
    let task_app = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        append_update_log(&format!("downloading update {}", update.version));
        match update.download(|_, _| {}, || {}).await {
            Ok(bytes) => handle_update_downloaded(&task_app, update, bytes),
            Err(error) => {
                append_update_log(&format!(
                    "failed to download update {}: {}",
                    update.version, error
                ));
            }
        }
    });
}

fn handle_update_downloaded(app_handle: &AppHandle, update: Update, bytes: Vec<u8>) {
    let state = app_handle.state::<ShellState>();
    let Some(delay) = claim_update_downloaded(&state) else {
        append_update_log("update-downloaded already handled; ignoring");
        return;
    };

    append_update_log(&format!(
        "update {} downloaded; installing and restarting in {}ms",
        update.version,
        delay.as_millis()
    ));
    let task_app = app_handle.clone();
    let handle = tauri::async_runtime::spawn(async move {
        tokio::time::sleep(delay).await;
        install_and_restart(&task_app, &update, &bytes);
    });
    state.restart_task.replace(handle);
}

fn install_and_restart(app_handle: &AppHandle, update: &Update, bytes: &[u8]) {
    if let Err(error) = update.install(bytes) {
        append_update_log(&format!(
            "failed to install update {}: {}",
            update.version, error
        ));
        return;
    }

    append_update_log(&format!(
        "update {} installed; restarting application",
        update.version
    ));
    app_handle.state::<ShellState>().mark_quitting();
    app_handle.request_restart();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polling_state() -> ShellState {
        let state = ShellState::default();
        state.poll_task.replace(tauri::async_runtime::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }));
        state
    }

    #[test]
    fn update_available_stops_polling_and_claims_dialog_once() {
        let state = polling_state();
        let dialog = claim_update_available(
            &state,
            UpdateChannel::Beta,
            TargetPlatform::Other,
            None,
            "2.1.0-beta",
        )
        .expect("first available dialog");
        assert_eq!(dialog.message, "2.1.0-beta");
        assert!(!state.poll_task.is_occupied());

        state.poll_task.replace(tauri::async_runtime::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }));
        let repeated = claim_update_available(
            &state,
            UpdateChannel::Beta,
            TargetPlatform::Other,
            None,
            "2.2.0-beta",
        );
        assert!(repeated.is_none());
        assert!(!state.poll_task.is_occupied());
    }

    #[test]
    fn update_not_available_stops_polling_and_claims_dialog_once() {
        let state = polling_state();
        assert!(claim_update_not_available(&state, UpdateChannel::Latest).is_some());
        assert!(!state.poll_task.is_occupied());
        assert!(claim_update_not_available(&state, UpdateChannel::Latest).is_none());
    }

    #[test]
    fn update_downloaded_stops_polling_and_schedules_restart_once() {
        let state = polling_state();
        assert_eq!(
            claim_update_downloaded(&state),
            Some(Duration::from_millis(3_500))
        );
        assert!(!state.poll_task.is_occupied());

        state.poll_task.replace(tauri::async_runtime::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }));
        assert_eq!(claim_update_downloaded(&state), None);
        assert!(!state.poll_task.is_occupied());
    }
}

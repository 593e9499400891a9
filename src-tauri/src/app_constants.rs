use std::time::Duration;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "Update Shell";
pub(crate) const MAIN_WINDOW_WIDTH: f64 = 800.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 800.0;
pub(crate) const PACKAGED_ENTRY_FILE: &str = "index.html";

pub(crate) const SHELL_CHANNEL_ENV: &str = "UPDATE_SHELL_CHANNEL";
pub(crate) const START_URL_ENV: &str = "UPDATE_SHELL_START_URL";
pub(crate) const UPDATE_ENDPOINT_ENV: &str = "UPDATE_SHELL_UPDATE_ENDPOINT";
pub(crate) const UPDATE_INTERVAL_ENV: &str = "UPDATE_SHELL_UPDATE_INTERVAL_MS";
pub(crate) const SHELL_ROOT_ENV: &str = "UPDATE_SHELL_ROOT";
pub(crate) const DEVELOPMENT_SHELL_CHANNEL: &str = "dev";

pub(crate) const DEFAULT_UPDATE_ENDPOINT_TEMPLATE: &str =
    "https://releases.update-shell.dev/{{channel}}/{{target}}-{{arch}}.json";
pub(crate) const DEFAULT_UPDATE_INTERVAL_MS: u64 = 10_000;
pub(crate) const UPDATE_INTERVAL_MIN_MS: u64 = 1_000;
pub(crate) const UPDATE_INTERVAL_MAX_MS: u64 = 60 * 60 * 1000;
pub(crate) const RESTART_AFTER_DOWNLOAD_DELAY: Duration = Duration::from_millis(3_500);

pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub(crate) const LOG_BACKUP_COUNT: usize = 5;
pub(crate) const TRAY_ID: &str = "update-shell-tray";

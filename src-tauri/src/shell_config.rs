use std::{env, path::Path, time::Duration};

use crate::{
    content_source::{self, ContentSource},
    DEFAULT_UPDATE_ENDPOINT_TEMPLATE, DEFAULT_UPDATE_INTERVAL_MS, DEVELOPMENT_SHELL_CHANNEL,
    SHELL_CHANNEL_ENV, START_URL_ENV, UPDATE_ENDPOINT_ENV, UPDATE_INTERVAL_ENV,
    UPDATE_INTERVAL_MAX_MS, UPDATE_INTERVAL_MIN_MS,
};

/// Process configuration resolved once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShellConfig {
    pub(crate) shell_channel: Option<String>,
    pub(crate) start_url: Option<String>,
    pub(crate) update_endpoint_template: String,
    pub(crate) update_check_interval: Duration,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_clamped_ms(raw: Option<String>, default_ms: u64, min_ms: u64, max_ms: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default_ms)
        .clamp(min_ms, max_ms)
}

impl ShellConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            shell_channel: non_empty(lookup(SHELL_CHANNEL_ENV)),
            start_url: non_empty(lookup(START_URL_ENV)),
            update_endpoint_template: non_empty(lookup(UPDATE_ENDPOINT_ENV))
                .unwrap_or_else(|| DEFAULT_UPDATE_ENDPOINT_TEMPLATE.to_string()),
            update_check_interval: Duration::from_millis(parse_clamped_ms(
                lookup(UPDATE_INTERVAL_ENV),
                DEFAULT_UPDATE_INTERVAL_MS,
                UPDATE_INTERVAL_MIN_MS,
                UPDATE_INTERVAL_MAX_MS,
            )),
        }
    }

    pub(crate) fn is_development(&self) -> bool {
        self.shell_channel.as_deref() == Some(DEVELOPMENT_SHELL_CHANNEL)
    }

    pub(crate) fn content_source(&self, workspace_root: &Path) -> Result<ContentSource, String> {
        content_source::resolve_content_source(
            self.is_development(),
            self.start_url.as_deref(),
            workspace_root,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ShellConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ShellConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]);
        assert_eq!(config.shell_channel, None);
        assert_eq!(config.start_url, None);
        assert_eq!(
            config.update_endpoint_template,
            DEFAULT_UPDATE_ENDPOINT_TEMPLATE
        );
        assert_eq!(config.update_check_interval, Duration::from_secs(10));
        assert!(!config.is_development());
    }

    #[test]
    fn development_channel_is_recognized_after_trimming() {
        assert!(config_from(&[(SHELL_CHANNEL_ENV, " dev ")]).is_development());
        assert!(!config_from(&[(SHELL_CHANNEL_ENV, "prod")]).is_development());
        assert!(!config_from(&[(SHELL_CHANNEL_ENV, "DEV")]).is_development());
    }

    #[test]
    fn update_interval_override_is_clamped() {
        let fast = config_from(&[(UPDATE_INTERVAL_ENV, "10")]);
        assert_eq!(fast.update_check_interval, Duration::from_millis(1_000));

        let slow = config_from(&[(UPDATE_INTERVAL_ENV, "999999999")]);
        assert_eq!(slow.update_check_interval, Duration::from_millis(3_600_000));

        let garbage = config_from(&[(UPDATE_INTERVAL_ENV, "soon")]);
        assert_eq!(garbage.update_check_interval, Duration::from_secs(10));
    }

    #[test]
    fn content_source_follows_shell_channel() {
        let root = std::env::temp_dir();
        let dev = config_from(&[
            (SHELL_CHANNEL_ENV, "dev"),
            (START_URL_ENV, "http://127.0.0.1:5173/"),
        ]);
        assert_eq!(
            dev.content_source(&root).expect("dev source").describe(),
            "development url http://127.0.0.1:5173/"
        );

        let packaged = config_from(&[(START_URL_ENV, "http://127.0.0.1:5173/")]);
        assert!(matches!(
            packaged.content_source(&root).expect("packaged source"),
            ContentSource::Packaged(_)
        ));
    }
}

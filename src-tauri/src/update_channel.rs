use std::fmt;

use url::Url;

const CHANNEL_PLACEHOLDER: &str = "{{channel}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateChannel {
    Alpha,
    Beta,
    Latest,
}

impl UpdateChannel {
    /// Derives the feed channel from the packaged version string. Anything
    /// without a prerelease marker, malformed versions included, tracks `latest`.
    pub(crate) fn from_version(version: &str) -> Self {
        if version.contains("-alpha") {
            Self::Alpha
        } else if version.contains("-beta") {
            Self::Beta
        } else {
            Self::Latest
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Latest => "latest",
        }
    }
}

impl fmt::Display for UpdateChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expands `{{channel}}` in the feed template. Tauri's own placeholders
/// (`{{target}}`, `{{arch}}`, `{{current_version}}`) are left for the updater.
pub(crate) fn feed_endpoint(template: &str, channel: UpdateChannel) -> Result<Url, String> {
    let trimmed = template.trim();
    if trimmed.is_empty() {
        return Err("Update endpoint template is empty.".to_string());
    }

    let expanded = trimmed.replace(CHANNEL_PLACEHOLDER, channel.as_str());
    Url::parse(&expanded).map_err(|error| format!("Invalid update endpoint '{expanded}': {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_version_detects_alpha_marker() {
        assert_eq!(UpdateChannel::from_version("1.2.0-alpha"), UpdateChannel::Alpha);
        assert_eq!(UpdateChannel::from_version("1.2.0-alpha.3"), UpdateChannel::Alpha);
    }

    #[test]
    fn from_version_detects_beta_marker() {
        assert_eq!(UpdateChannel::from_version("2.0.0-beta"), UpdateChannel::Beta);
        assert_eq!(UpdateChannel::from_version("2.0.0-beta.1"), UpdateChannel::Beta);
    }

    #[test]
    fn from_version_prefers_alpha_when_both_markers_present() {
        assert_eq!(
            UpdateChannel::from_version("3.0.0-beta-alpha"),
            UpdateChannel::Alpha
        );
    }

    #[test]
    fn from_version_defaults_to_latest() {
        assert_eq!(UpdateChannel::from_version("1.0.0"), UpdateChannel::Latest);
        assert_eq!(UpdateChannel::from_version("1.0.0-rc.1"), UpdateChannel::Latest);
        assert_eq!(UpdateChannel::from_version("not a version"), UpdateChannel::Latest);
        assert_eq!(UpdateChannel::from_version(""), UpdateChannel::Latest);
    }

    #[test]
    fn feed_endpoint_expands_channel_and_keeps_updater_placeholders() {
        let url = feed_endpoint(
            "https://example.com/{{channel}}/{{target}}.json",
            UpdateChannel::Beta,
        )
        .expect("valid endpoint");
        assert!(url.as_str().starts_with("https://example.com/beta/"));
        assert!(url.as_str().contains("target"));
    }

    #[test]
    fn feed_endpoint_rejects_empty_or_invalid_templates() {
        assert!(feed_endpoint("  ", UpdateChannel::Latest).is_err());
        assert!(feed_endpoint("not a url {{channel}}", UpdateChannel::Latest).is_err());
    }
}

use std::path::{Path, PathBuf};

use tauri::WebviewUrl;
use url::Url;

use crate::PACKAGED_ENTRY_FILE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContentSource {
    /// Development content: the start URL override or the local index as a `file://` URL.
    Development(Url),
    /// Entry file bundled with the app and served by the app protocol.
    Packaged(PathBuf),
}

impl ContentSource {
    pub(crate) fn to_webview_url(&self) -> WebviewUrl {
        match self {
            Self::Development(url) => WebviewUrl::External(url.clone()),
            Self::Packaged(path) => WebviewUrl::App(path.clone()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Development(url) => format!("development url {url}"),
            Self::Packaged(path) => format!("packaged entry {}", path.display()),
        }
    }
}

pub(crate) fn default_development_index(workspace_root: &Path) -> Result<Url, String> {
    let index_path = workspace_root.join("dist").join(PACKAGED_ENTRY_FILE);
    Url::from_file_path(&index_path).map_err(|()| {
        format!(
            "Cannot build a file URL for the development index {}",
            index_path.display()
        )
    })
}

/// Picks the window content. Only the development shell channel honours the
/// start URL; every other channel loads the packaged entry.
pub(crate) fn resolve_content_source(
    is_development: bool,
    start_url: Option<&str>,
    workspace_root: &Path,
) -> Result<ContentSource, String> {
    if !is_development {
        return Ok(ContentSource::Packaged(PathBuf::from(PACKAGED_ENTRY_FILE)));
    }

    match start_url.map(str::trim).filter(|value| !value.is_empty()) {
        Some(raw_url) => Url::parse(raw_url)
            .map(ContentSource::Development)
            .map_err(|error| format!("Invalid development start URL '{raw_url}': {error}")),
        None => default_development_index(workspace_root).map(ContentSource::Development),
    }
}

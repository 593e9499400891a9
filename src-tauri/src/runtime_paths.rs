use std::{env, path::PathBuf};

use crate::SHELL_ROOT_ENV;

const DEFAULT_ROOT_DIR_NAME: &str = ".update-shell";

pub(crate) fn default_packaged_root_dir() -> Option<PathBuf> {
    root_dir_from(env::var(SHELL_ROOT_ENV).ok(), home::home_dir())
}

fn root_dir_from(root_override: Option<String>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(root) = root_override {
        let path = PathBuf::from(root.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    home_dir.map(|home| home.join(DEFAULT_ROOT_DIR_NAME))
}

/// Repository root used to locate the default development index.
pub(crate) fn workspace_root_dir() -> PathBuf {
    let candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");
    candidate
        .canonicalize()
        .unwrap_or(candidate)
}

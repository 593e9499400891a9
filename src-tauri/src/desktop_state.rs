use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

const AUTO_UPDATE_CHECK_FIELD: &str = "autoUpdateCheck";

fn empty_state_object() -> Value {
    Value::Object(Map::new())
}

pub(crate) fn desktop_state_path(root_dir: Option<&Path>) -> Option<PathBuf> {
    root_dir.map(|root| root.join("data").join("desktop_state.json"))
}

pub(crate) fn read_cached_auto_update_check_enabled(root_dir: Option<&Path>) -> Option<bool> {
    let state_path = desktop_state_path(root_dir)?;
    let raw = fs::read_to_string(state_path).ok()?;
    let parsed: Value = serde_json::from_str(&raw).ok()?;
    parsed.get(AUTO_UPDATE_CHECK_FIELD)?.as_bool()
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = empty_state_object();
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("desktop state root was normalized into an object"),
    }
}

pub(crate) fn write_cached_auto_update_check_enabled<F>(
    enabled: bool,
    root_dir: Option<&Path>,
    log: F,
) -> Result<(), String>
where
    F: Fn(&str),
{
    let Some(state_path) = desktop_state_path(root_dir) else {
        log("desktop state path is unavailable; skipping auto update check persistence");
        return Ok(());
    };

    if let Some(parent_dir) = state_path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create desktop state directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    let mut parsed = match fs::read_to_string(&state_path) {
        Ok(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(error) => {
                log(&format!(
                    "failed to parse desktop state {}: {}. resetting state file",
                    state_path.display(),
                    error
                ));
                empty_state_object()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => empty_state_object(),
        Err(error) => {
            return Err(format!(
                "Failed to read desktop state {}: {}",
                state_path.display(),
                error
            ));
        }
    };
    if !parsed.is_object() {
        log(&format!(
            "desktop state {} has non-object root; resetting state file",
            state_path.display()
        ));
    }
    ensure_object(&mut parsed).insert(AUTO_UPDATE_CHECK_FIELD.to_string(), Value::Bool(enabled));

    let serialized = serde_json::to_string_pretty(&parsed)
        .map_err(|error| format!("Failed to serialize desktop state: {error}"))?;
    fs::write(&state_path, serialized).map_err(|error| {
        format!(
            "Failed to write desktop state {}: {}",
            state_path.display(),
            error
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_log(_: &str) {}

    #[test]
    fn missing_state_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(read_cached_auto_update_check_enabled(Some(dir.path())), None);
        assert_eq!(read_cached_auto_update_check_enabled(None), None);
    }

    #[test]
    fn write_then_read_auto_update_check_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_cached_auto_update_check_enabled(false, Some(dir.path()), no_log).expect("write");
        assert_eq!(
            read_cached_auto_update_check_enabled(Some(dir.path())),
            Some(false)
        );
    }

    #[test]
    fn write_preserves_unknown_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = desktop_state_path(Some(dir.path())).expect("state path");
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, r#"{"windowBounds":{"width":800}}"#).expect("seed state");

        write_cached_auto_update_check_enabled(true, Some(dir.path()), no_log).expect("write");

        let value: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(value["windowBounds"]["width"], 800);
        assert_eq!(value[AUTO_UPDATE_CHECK_FIELD], true);
    }

    #[test]
    fn write_resets_corrupt_or_non_object_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = desktop_state_path(Some(dir.path())).expect("state path");
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");

        for seed in ["{not json", "[1, 2, 3]"] {
            fs::write(&path, seed).expect("seed state");
            write_cached_auto_update_check_enabled(false, Some(dir.path()), no_log)
                .expect("write");
            assert_eq!(
                read_cached_auto_update_check_enabled(Some(dir.path())),
                Some(false)
            );
        }
    }

    #[test]
    fn write_without_root_is_skipped() {
        assert!(write_cached_auto_update_check_enabled(true, None, no_log).is_ok());
    }
}

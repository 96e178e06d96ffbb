use chrono::{DateTime, Local};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::model::StoreError;

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

pub fn format_seconds(seconds: u64) -> String {
    format_duration(Duration::from_secs(seconds))
}

/// Local date and time, minute precision.
pub fn format_timestamp(timestamp: SystemTime) -> String {
    let local: DateTime<Local> = timestamp.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Writes `value` as pretty JSON to a sibling `.tmp` file and renames it over
/// `path`, creating parent directories first. Readers never see a partial file.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let contents = serde_json::to_string_pretty(value)?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    fs::write(&staging, contents)?;
    fs::rename(&staging, path)?;
    debug!(target: "storage", "Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(75), "01:15");
        assert_eq!(format_seconds(3_725), "01:02:05");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let formatted = format_timestamp(SystemTime::now());
        assert_eq!(formatted.len(), "2024-01-01 00:00".len());
        assert_eq!(&formatted[4..5], "-");
    }

    #[test]
    fn test_write_json_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        write_json_atomic(&path, &vec![1, 2]).unwrap();
        write_json_atomic(&path, &vec![3]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(serde_json::from_str::<Vec<i32>>(&contents).unwrap(), vec![3]);
        assert!(contents.contains('\n'), "expected pretty output: {}", contents);
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());
    }

    #[test]
    fn test_write_json_atomic_reports_blocked_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(matches!(
            write_json_atomic(&path, &"value"),
            Err(StoreError::Io(_))
        ));
        assert!(path.join("occupied").is_dir());
    }
}

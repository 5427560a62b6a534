use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, SecondsFormat};

use crate::runtime_paths;

pub(crate) fn resolve_desktop_log_path(
    data_root_dir: Option<PathBuf>,
    file_name: &str,
) -> PathBuf {
    runtime_paths::logs_dir(data_root_dir).join(file_name)
}

pub(crate) fn format_log_line(scope: &str, message: &str, timestamp: DateTime<Local>) -> String {
    format!(
        "[{}] [{}] {}\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
        scope,
        message.trim_end()
    )
}

fn rotated_log_path(path: &Path) -> PathBuf {
    let mut rotated = path.as_os_str().to_owned();
    rotated.push(".1");
    PathBuf::from(rotated)
}

/// Moves `path` aside to `<path>.1` once it reaches `max_bytes`, replacing
/// any previous rotation.
fn rotate_if_needed(path: &Path, max_bytes: u64) -> Result<(), String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => {
            return Err(format!(
                "Failed to stat log file {}: {}",
                path.display(),
                error
            ));
        }
    };
    if size < max_bytes {
        return Ok(());
    }

    let rotated = rotated_log_path(path);
    fs::rename(path, &rotated).map_err(|error| {
        format!(
            "Failed to rotate log file {} to {}: {}",
            path.display(),
            rotated.display(),
            error
        )
    })
}

pub(crate) fn append_log_line(
    path: &Path,
    scope: &str,
    message: &str,
    max_bytes: u64,
) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }
    rotate_if_needed(path, max_bytes)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    file.write_all(format_log_line(scope, message, Local::now()).as_bytes())
        .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{Local, TimeZone};

    use super::*;

    #[test]
    fn format_log_line_includes_scope_and_timestamp() {
        let timestamp = Local
            .with_ymd_and_hms(2024, 5, 17, 9, 30, 0)
            .single()
            .expect("unambiguous local timestamp");
        let line = format_log_line("startup", "window created\n", timestamp);

        assert!(line.starts_with("[2024-05-17T09:30:00.000"));
        assert!(line.ends_with("[startup] window created\n"));
    }

    #[test]
    fn append_log_line_creates_missing_directories() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("nested").join("logs").join("desktop.log");

        append_log_line(&path, "desktop", "first", 1024).expect("append first line");
        append_log_line(&path, "desktop", "second", 1024).expect("append second line");

        let contents = fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[desktop] first"));
        assert!(lines[1].ends_with("[desktop] second"));
    }

    #[test]
    fn append_log_line_rotates_when_threshold_is_reached() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("desktop.log");
        fs::write(&path, "x".repeat(64)).expect("seed log");

        append_log_line(&path, "bridge", "after rotation", 64).expect("append");

        let rotated = fs::read_to_string(temp.path().join("desktop.log.1")).expect("rotated log");
        assert_eq!(rotated, "x".repeat(64));
        let current = fs::read_to_string(&path).expect("current log");
        assert!(current.ends_with("[bridge] after rotation\n"));
        assert_eq!(current.lines().count(), 1);
    }

    #[test]
    fn append_log_line_keeps_small_files_in_place() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("desktop.log");
        fs::write(&path, "seed\n").expect("seed log");

        append_log_line(&path, "desktop", "more", 1024).expect("append");

        assert!(!temp.path().join("desktop.log.1").exists());
        let current = fs::read_to_string(&path).expect("current log");
        assert!(current.starts_with("seed\n"));
    }

    #[test]
    fn resolve_desktop_log_path_uses_logs_subdirectory() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = resolve_desktop_log_path(Some(temp.path().to_path_buf()), "desktop.log");
        assert_eq!(path, temp.path().join("logs").join("desktop.log"));
    }
}

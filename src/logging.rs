//! Daily log file setup.
//!
//! Opens one append-mode log file per calendar day (`server-YYYY-MM-DD.log`)
//! inside the configured log directory, creating the directory if needed.
//! Failure is surfaced as a `Result` so the caller can decide whether to
//! proceed; the server treats it as a non-fatal degradation and continues
//! with stdout logging only.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Handle to the current day's log file.
///
/// The process-wide log sink is standard output; this file is opened in
/// append mode and held for the process lifetime but is not itself the sink
/// target. Restarting on the same calendar day reopens and appends to the
/// same file.
#[derive(Debug)]
pub struct DailyLogFile {
    path: PathBuf,
    _file: File,
}

impl DailyLogFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to open log file {path:?}: {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Ensure the log directory exists and open today's log file in append mode.
pub fn open_daily_log(dir: &Path) -> Result<DailyLogFile, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(daily_file_name(&Local::now().format("%Y-%m-%d").to_string()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.clone(),
            source,
        })?;

    Ok(DailyLogFile { path, _file: file })
}

fn daily_file_name(date: &str) -> String {
    format!("server-{date}.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_embeds_date() {
        assert_eq!(daily_file_name("2024-03-09"), "server-2024-03-09.log");
    }

    #[test]
    fn creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");

        let log = open_daily_log(&dir).unwrap();
        assert!(log.path().exists());
        assert!(log.path().starts_with(&dir));
        let name = log.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("server-") && name.ends_with(".log"));
    }

    #[test]
    fn reopening_same_day_appends() {
        use std::io::Write;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");

        let first = open_daily_log(&dir).unwrap();
        std::fs::write(first.path(), b"line one\n").unwrap();
        drop(first);

        let second = open_daily_log(&dir).unwrap();
        let mut f = OpenOptions::new().append(true).open(second.path()).unwrap();
        f.write_all(b"line two\n").unwrap();

        let contents = std::fs::read_to_string(second.path()).unwrap();
        assert_eq!(contents, "line one\nline two\n");
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A file where the directory should be makes create_dir_all fail.
        let blocker = tmp.path().join("logs");
        std::fs::write(&blocker, b"").unwrap();

        let err = open_daily_log(&blocker).unwrap_err();
        assert!(matches!(err, LoggingError::CreateDir { .. }));
    }
}

//! Tracing subscriber setup
//!
//! stdio mode owns stdout for the MCP protocol, so its logs go to a timestamped file
//! under the log directory (stderr if the file cannot be created). Network modes log
//! to stderr.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

/// Installs the global subscriber; call once at startup
pub fn init(stdio_mode: bool, log_dir: &Path) -> LogSink {
    if stdio_mode {
        match open_log_file(log_dir) {
            Ok((path, file)) => {
                tracing_subscriber::fmt()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_env_filter(env_filter())
                    .init();
                return LogSink::File(path);
            }
            Err(e) => {
                eprintln!(
                    "Failed to create log file in {}: {}, logging to stderr",
                    log_dir.display(),
                    e
                );
            }
        }
    }

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(env_filter())
        .init();
    LogSink::Stderr
}

/// `RUST_LOG`, defaulting to `info`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Creates `{dir}/server-<timestamp>.log`, creating `dir` if needed
pub fn open_log_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let name = format!(
        "server-{}.log",
        chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S%.3fZ")
    );
    let path = dir.join(name);
    let file = File::options().create(true).append(true).open(&path)?;
    Ok((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_created_in_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");

        let (path, _file) = open_log_file(&dir).unwrap();

        assert!(path.exists());
        assert_eq!(path.parent(), Some(dir.as_path()));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("server-") && name.ends_with(".log"));
    }

    #[test]
    fn test_unwritable_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        assert!(open_log_file(&blocker.join("logs")).is_err());
    }
}

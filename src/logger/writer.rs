//! File writer for the logger

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use super::config::FileConfig;
use super::error::LoggerError;

/// Open the configured log file, creating parent directories first.
///
/// `Mutex<File>` is a `MakeWriter`, so the result plugs straight into a
/// `fmt::layer()`.
pub(crate) fn open_log_file(config: &FileConfig) -> Result<Mutex<File>, LoggerError> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(config.append)
        .truncate(!config.append)
        .open(&config.path)?;

    Ok(Mutex::new(file))
}

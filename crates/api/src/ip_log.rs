//! Flat append-only IP access log.
//!
//! One `IP: <ip> | Time: <timestamp>` line per request, no rotation, no
//! sampling. The file handle lives behind a std mutex; writes are tiny and
//! the lock is uncontended in practice.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Name of the access log file within the log directory.
const LOG_FILE_NAME: &str = "ip_log.log";

/// Append-only writer for the request IP log.
#[derive(Debug)]
pub struct IpLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl IpLog {
    /// Open (creating if needed) `<log_dir>/ip_log.log` for appending.
    pub fn open(log_dir: impl AsRef<Path>) -> io::Result<Self> {
        let log_dir = log_dir.as_ref();
        std::fs::create_dir_all(log_dir)?;
        let path = log_dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    /// Append one access line for `ip` stamped with the current time.
    pub fn append(&self, ip: &str) -> io::Result<()> {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = self.file.lock().expect("ip log lock poisoned");
        writeln!(file, "IP: {ip} | Time: {timestamp}")
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

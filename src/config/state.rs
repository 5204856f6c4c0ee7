// Server state module
// Immutable per-process settings shared by every connection

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use super::types::ServeConfig;

/// State handed to each connection task
///
/// Nothing in here changes after startup, so it is shared behind a plain
/// `Arc` without locks.
#[derive(Debug, Clone)]
pub struct ServeState {
    /// Document root all request paths resolve against
    pub root: PathBuf,
    pub access_log: bool,
    pub access_log_format: String,
    pub header_read_timeout: Duration,
}

impl ServeState {
    /// Build state from configuration, resolving the document root
    pub fn from_config(config: &ServeConfig) -> io::Result<Self> {
        let root = config.document_root()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("document root is not a directory: {}", root.display()),
            ));
        }

        Ok(Self {
            root,
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
            header_read_timeout: Duration::from_secs(config.server.header_read_timeout),
        })
    }

    /// State serving `root` with access logging off, as used by tests and
    /// embedders
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            access_log: false,
            access_log_format: "common".to_string(),
            header_read_timeout: Duration::from_secs(30),
        }
    }

    /// Whether `page` exists as a regular file under the document root
    pub fn has_entry_page(&self, page: &str) -> bool {
        self.root.join(page).is_file()
    }
}

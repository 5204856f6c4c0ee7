//! Error type for engine downloads.
//!
//! Every failure is still just "the download failed" to the operator, but
//! the variant records which layer gave up.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum FetchError {
    /// DNS, connect, TLS, timeout or body read failure
    Network(reqwest::Error),

    /// The server answered with a non-2xx status
    Status(u16),

    /// Creating the directory or writing the file failed
    Filesystem(io::Error),
}

impl FetchError {
    /// Short label for the failing layer
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status(_) => "http status",
            Self::Filesystem(_) => "filesystem",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Status(code) => write!(f, "HTTP error: {code}"),
            Self::Filesystem(err) => write!(f, "filesystem error: {err}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::Filesystem(err) => Some(err),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error)
    }
}

impl From<io::Error> for FetchError {
    fn from(error: io::Error) -> Self {
        Self::Filesystem(error)
    }
}

// Configuration types module
// Defines the settings structures for both tools

use serde::Deserialize;

/// Static server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServeConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Document root; the executable's directory when unset
    #[serde(default)]
    pub root: Option<String>,
    /// Page advertised in the startup banner (not enforced)
    pub entry_page: String,
    /// Seconds a client may take to send request headers, including the
    /// idle wait between keep-alive requests
    pub header_read_timeout: u64,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (`common` or `combined`)
    pub access_log_format: String,
}

/// Engine fetcher configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    pub fetch: FetchSettings,
}

/// Download source, destination and timeouts
#[derive(Debug, Deserialize, Clone)]
pub struct FetchSettings {
    pub url: String,
    pub destination: String,
    /// Seconds
    pub connect_timeout: u64,
    /// Seconds, whole request including body
    pub timeout: u64,
}

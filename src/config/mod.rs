// Configuration module entry point
// Layered settings (defaults, optional file, environment) for both tools

mod state;
mod types;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

// Re-export public types
pub use state::ServeState;
pub use types::{FetchConfig, FetchSettings, LoggingConfig, ServeConfig, ServerConfig};

/// Default server config file (extension resolved by the `config` crate)
pub const SERVE_CONFIG_FILE: &str = "chesssim-serve";
/// Default fetcher config file
pub const FETCH_CONFIG_FILE: &str = "fetch-stockfish";

pub const DEFAULT_PORT: u16 = 8000;
pub const STOCKFISH_URL: &str = "https://unpkg.com/stockfish.js@10.0.2/stockfish.js";
pub const STOCKFISH_DESTINATION: &str = "stockfish/stockfish.js";

impl ServeConfig {
    /// Load from `chesssim-serve.toml` (if present) and `CHESSSIM_SERVE_*`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(SERVE_CONFIG_FILE)
    }

    /// Load configuration from specified file path
    ///
    /// With no file and no environment overrides this yields the stock
    /// behavior: all interfaces, port 8000, root next to the executable.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CHESSSIM_SERVE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.entry_page", "database.html")?
            .set_default("server.header_read_timeout", 30)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Directory files are served from
    ///
    /// An explicit `server.root` wins; otherwise the directory holding the
    /// running executable, so the served tree does not depend on where the
    /// operator launched the process from.
    pub fn document_root(&self) -> io::Result<PathBuf> {
        if let Some(root) = &self.server.root {
            return Ok(PathBuf::from(root));
        }
        let exe = std::env::current_exe()?;
        exe.parent().map(std::path::Path::to_path_buf).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("executable path has no parent: {}", exe.display()),
            )
        })
    }
}

impl FetchConfig {
    /// Load from `fetch-stockfish.toml` (if present) and `CHESSSIM_FETCH_*`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(FETCH_CONFIG_FILE)
    }

    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CHESSSIM_FETCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("fetch.url", STOCKFISH_URL)?
            .set_default("fetch.destination", STOCKFISH_DESTINATION)?
            .set_default("fetch.connect_timeout", 10)?
            .set_default("fetch.timeout", 120)?
            .build()?;

        settings.try_deserialize()
    }
}

//! Logger module
//!
//! Console logging for the tools: lifecycle banners, access lines, warnings
//! and errors. Informational lines go to stdout, problems to stderr.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

fn write_info(message: &str) {
    println!("{message}");
}

fn write_error(message: &str) {
    eprintln!("{message}");
}

/// Startup banner; mirrors the URLs an operator opens in the browser
pub fn log_server_start(addr: &SocketAddr, root: &Path, entry_page: &str) {
    let port = addr.port();
    write_info(&format!("Server running at http://localhost:{port}/"));
    write_info(&format!(
        "Open http://localhost:{port}/{entry_page} for the game database"
    ));
    write_info(&format!("[INFO] Listening on {addr}, serving {}", root.display()));
    write_info("Press Ctrl+C to stop the server");
}

/// The advertised page is absent, usually because the root was not set
pub fn log_missing_entry_page(root: &Path, entry_page: &str) {
    log_warning(&format!(
        "{entry_page} not found in {}; set server.root (or CHESSSIM_SERVE_SERVER__ROOT) to the app directory",
        root.display()
    ));
}

pub fn log_shutdown(reason: &str) {
    write_info(&format!("\n[INFO] {reason}, shutting down"));
}

pub fn log_server_stopped() {
    write_info("[INFO] Listener closed");
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    log_error(&format!("Failed to bind {addr}: {err}"));
    if err.kind() == std::io::ErrorKind::AddrInUse {
        write_error("        Another server is already using this port");
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

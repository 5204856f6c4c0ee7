//! Request handler module
//!
//! Method dispatch plus static file serving from the document root.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

//! HTTP protocol layer module
//!
//! Header policy, content types, dates and response builders shared by the
//! request handlers.

pub mod date;
pub mod headers;
pub mod listing;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use headers::{apply_isolation_headers, ISOLATION_HEADERS};
pub use response::{
    build_304_response, build_404_response, build_501_response, build_file_response,
    build_html_response, build_options_response, build_redirect_response,
};

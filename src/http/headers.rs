//! Cross-origin isolation headers
//!
//! Threaded engine builds need `SharedArrayBuffer`, which browsers only expose
//! to cross-origin isolated pages. The same six headers go out on every
//! response, whatever the path, method or status.

use hyper::header::{HeaderName, HeaderValue};
use hyper::Response;

/// Header set applied to every response, in the order it is written.
///
/// | Header                         | Value               |
/// |--------------------------------|---------------------|
/// | `Access-Control-Allow-Origin`  | `*`                 |
/// | `Access-Control-Allow-Methods` | `GET, POST, OPTIONS`|
/// | `Access-Control-Allow-Headers` | `*`                 |
/// | `Cross-Origin-Embedder-Policy` | `require-corp`      |
/// | `Cross-Origin-Opener-Policy`   | `same-origin`       |
/// | `Cache-Control`                | `no-cache`          |
pub const ISOLATION_HEADERS: [(&str, &str); 6] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "*"),
    ("cross-origin-embedder-policy", "require-corp"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cache-control", "no-cache"),
];

/// Apply the isolation header set to a response
///
/// Existing values with the same name are replaced, so each header appears
/// exactly once even if a builder already set, say, `Cache-Control`.
pub fn apply_isolation_headers<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    for (name, value) in ISOLATION_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

//! Request dispatch module
//!
//! Entry point for HTTP request processing: picks a handler by method, then
//! stamps the isolation headers on the result.

use crate::config::ServeState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Request context encapsulating what the file handlers need
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) request path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// Generic over the request body: no handler reads it, so it is dropped
/// up front.
pub async fn handle_request<B>(
    req: Request<B>,
    state: &ServeState,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let parts = req.into_parts().0;
    let method = &parts.method;
    let uri = &parts.uri;

    let mut response = match *method {
        Method::OPTIONS => http::build_options_response(),
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: uri.path(),
                query: uri.query(),
                is_head: *method == Method::HEAD,
                if_modified_since: parts
                    .headers
                    .get("if-modified-since")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
            };
            static_files::serve_path(&ctx, &state.root).await
        }
        _ => http::build_501_response(method),
    };

    http::apply_isolation_headers(&mut response);

    if state.access_log {
        log_access(&parts, &response, remote_addr, &state.access_log_format);
    }

    Ok(response)
}

fn log_access(
    req: &Parts,
    response: &Response<Full<Bytes>>,
    remote_addr: SocketAddr,
    format: &str,
) {
    let header = |name: &str| {
        req.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = version_label(req.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");

    logger::log_access(&entry, format);
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ISOLATION_HEADERS;
    use http_body_util::{BodyExt, Empty};
    use std::fs;

    fn request(method: &str, uri: &str) -> Request<Empty<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Empty::new())
            .unwrap()
    }

    fn remote() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    fn assert_isolation_headers(resp: &Response<Full<Bytes>>) {
        for (name, value) in ISOLATION_HEADERS {
            assert_eq!(resp.headers()[name], value, "header {name}");
        }
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("database.html"), "<h1>games</h1>").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_options_short_circuits_missing_path() {
        let dir = site();
        let state = ServeState::with_root(dir.path());

        let resp = handle_request(request("OPTIONS", "/no/such/file.js"), &state, remote())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_isolation_headers(&resp);
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_existing_file() {
        let dir = site();
        let state = ServeState::with_root(dir.path());

        let resp = handle_request(request("GET", "/database.html"), &state, remote())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "text/html; charset=utf-8");
        assert_isolation_headers(&resp);
        assert_eq!(body_of(resp).await, "<h1>games</h1>");
    }

    #[tokio::test]
    async fn test_get_missing_file_is_404_with_headers() {
        let dir = site();
        let state = ServeState::with_root(dir.path());

        let resp = handle_request(request("GET", "/missing.js"), &state, remote())
            .await
            .unwrap();

        assert_eq!(resp.status(), 404);
        assert_isolation_headers(&resp);
    }

    #[tokio::test]
    async fn test_every_method_gets_headers() {
        let dir = site();
        let state = ServeState::with_root(dir.path());

        for method in ["GET", "HEAD", "POST", "OPTIONS", "PUT", "DELETE", "PURGE"] {
            let resp = handle_request(request(method, "/database.html"), &state, remote())
                .await
                .unwrap();
            assert_isolation_headers(&resp);
        }
    }

    #[tokio::test]
    async fn test_post_is_unsupported() {
        let dir = site();
        let state = ServeState::with_root(dir.path());

        let resp = handle_request(request("POST", "/database.html"), &state, remote())
            .await
            .unwrap();
        assert_eq!(resp.status(), 501);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let dir = site();
        let state = ServeState::with_root(dir.path());

        let resp = handle_request(request("HEAD", "/database.html"), &state, remote())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-length"], "14");
        assert!(body_of(resp).await.is_empty());
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
    }
}

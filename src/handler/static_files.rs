//! Static file serving module
//!
//! Maps request paths onto the document root and serves files, index pages
//! and directory listings.

use crate::handler::router::RequestContext;
use crate::http::{self, date, listing, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Files tried, in order, when a directory is requested
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serve whatever `ctx.path` names under `root`
pub async fn serve_path(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    let relative = translate_path(ctx.path);

    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Document root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return http::build_404_response();
        }
    };

    // Missing files are the common 404, not worth a log line
    let Ok(target) = fs::canonicalize(root_canonical.join(&relative)).await else {
        return http::build_404_response();
    };
    if !target.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path outside document root blocked: {} -> {}",
            ctx.path,
            target.display()
        ));
        return http::build_404_response();
    }

    let Ok(metadata) = fs::metadata(&target).await else {
        return http::build_404_response();
    };

    if metadata.is_dir() {
        return serve_directory(ctx, &target).await;
    }

    // A trailing slash names a directory; a file can't satisfy it
    if ctx.path.ends_with('/') {
        return http::build_404_response();
    }

    serve_file(ctx, &target, &metadata).await
}

/// Turn a raw request path into a relative filesystem path
///
/// The path is percent-decoded and split on `/`. Empty, `.` and `..`
/// segments are dropped rather than resolved, as is anything the platform
/// would read as more than one component (a separator, a drive prefix), so
/// the result can only point below the root.
pub fn translate_path(raw_path: &str) -> PathBuf {
    let decoded = percent_decode_str(raw_path).decode_utf8_lossy();

    decoded
        .split('/')
        .filter(|segment| {
            let mut components = Path::new(segment).components();
            matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            )
        })
        .collect()
}

/// Directory request: redirect to add the slash, then index file or listing
async fn serve_directory(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    if !ctx.path.ends_with('/') {
        let location = match ctx.query {
            Some(q) => format!("{}/?{q}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return http::build_redirect_response(&location);
    }

    for index_file in INDEX_FILES {
        let index_path = dir.join(index_file);
        if let Ok(metadata) = fs::metadata(&index_path).await {
            if metadata.is_file() {
                return serve_file(ctx, &index_path, &metadata).await;
            }
        }
    }

    serve_listing(ctx, dir).await
}

/// Serve a regular file, honoring `If-Modified-Since`
async fn serve_file(
    ctx: &RequestContext<'_>,
    file_path: &Path,
    metadata: &Metadata,
) -> Response<Full<Bytes>> {
    let modified = metadata.modified().ok();
    let last_modified = modified.map(date::format_http_date);

    if let (Some(modified), Some(since)) = (
        modified,
        ctx.if_modified_since
            .as_deref()
            .and_then(date::parse_http_date),
    ) {
        if date::not_modified_since(modified, &since) {
            return http::build_304_response(last_modified.as_deref().unwrap_or_default());
        }
    }

    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response();
        }
    };

    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(file_path),
        last_modified.as_deref(),
        ctx.is_head,
    )
}

/// Render an HTML listing of `dir`
async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    let mut entries = match read_listing(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            return http::build_404_response();
        }
    };
    listing::sort_entries(&mut entries);

    let display_path = percent_decode_str(ctx.path).decode_utf8_lossy();
    let html = listing::render_listing(&display_path, &entries);
    http::build_html_response(html, ctx.is_head)
}

async fn read_listing(dir: &Path) -> std::io::Result<Vec<listing::ListingEntry>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let file_type = entry.file_type().await?;
        // Symlinks count as directories when their target is one
        let is_dir = if file_type.is_symlink() {
            fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };
        entries.push(listing::ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink: file_type.is_symlink(),
        });
    }

    Ok(entries)
}

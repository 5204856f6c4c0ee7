//! HTTP date handling for `Last-Modified` / `If-Modified-Since`

use chrono::{DateTime, Utc};
use std::time::SystemTime;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an `If-Modified-Since` value
///
/// Returns `None` for anything that is not a valid RFC 2822 style date, in
/// which case the header is ignored.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Whether a file modified at `modified` is unchanged since `since`
///
/// HTTP dates carry whole seconds, so the sub-second part of the mtime is
/// dropped before comparing.
pub fn not_modified_since(modified: SystemTime, since: &DateTime<Utc>) -> bool {
    let modified = DateTime::<Utc>::from(modified).timestamp();
    modified <= since.timestamp()
}

//! MIME type detection module
//!
//! Maps a file path to a Content-Type by its extension (case-insensitive).

use std::path::Path;

/// Get MIME Content-Type for a file path
///
/// # Examples
/// ```
/// use chesssim_tools::http::mime::content_type_for;
/// use std::path::Path;
/// assert_eq!(content_type_for(Path::new("stockfish/stockfish.js")), "text/javascript");
/// assert_eq!(content_type_for(Path::new("games.PGN")), "application/x-chess-pgn");
/// assert_eq!(content_type_for(Path::new("LICENSE")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    content_type(extension.as_deref())
}

/// Get MIME Content-Type for an already lowercased extension
pub fn content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Documents the app itself is made of
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js" | "mjs") => "text/javascript",
        Some("json" | "map") => "application/json",
        Some("wasm") => "application/wasm",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Chess data
        Some("pgn") => "application/x-chess-pgn",
        Some("fen" | "epd") => "text/plain; charset=utf-8",
        Some("nnue" | "bin") => "application/octet-stream",

        // Images (piece sets, boards)
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Sounds
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_types() {
        assert_eq!(content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Some("js")), "text/javascript");
        assert_eq!(content_type(Some("wasm")), "application/wasm");
        assert_eq!(content_type(Some("pgn")), "application/x-chess-pgn");
    }

    #[test]
    fn test_extension_case_ignored() {
        assert_eq!(
            content_type_for(Path::new("database.HTML")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("a/b/pieces.Svg")), "image/svg+xml");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("Makefile")), "application/octet-stream");
    }
}

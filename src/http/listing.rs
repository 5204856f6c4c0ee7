//! Directory listing page
//!
//! Rendered for directories that have no index file.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched in listing hrefs (RFC 3986 unreserved plus `/`)
const HREF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Label shown to the user: `dir/` for directories, `link@` for symlinks
    fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else if self.is_symlink {
            format!("{}@", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Relative href; directories keep a trailing slash so links resolve
    /// inside them
    fn link_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Sort entries case-insensitively, the way they are listed
pub fn sort_entries(entries: &mut [ListingEntry]) {
    entries.sort_by_key(|e| e.name.to_lowercase());
}

/// Render the listing page for `display_path` (already percent-decoded)
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = String::with_capacity(256 + entries.len() * 64);

    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        let href = utf8_percent_encode(&entry.link_name(), HREF_ENCODE_SET).to_string();
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            href,
            escape_html(&entry.display_name())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn test_sort_case_insensitive() {
        let mut entries = vec![
            entry("ui.js", false, false),
            entry("Database.html", false, false),
            entry("chess.js", false, false),
        ];
        sort_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["chess.js", "Database.html", "ui.js"]);
    }

    #[test]
    fn test_render_marks_dirs_and_links() {
        let html = render_listing(
            "/",
            &[
                entry("stockfish", true, false),
                entry("latest.pgn", false, true),
            ],
        );
        assert!(html.contains("<title>Directory listing for /</title>"));
        assert!(html.contains("<a href=\"stockfish/\">stockfish/</a>"));
        assert!(html.contains("<a href=\"latest.pgn\">latest.pgn@</a>"));
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render_listing("/", &[entry("a b<&>.txt", false, false)]);
        assert!(html.contains("href=\"a%20b%3C%26%3E.txt\""));
        assert!(html.contains(">a b&lt;&amp;&gt;.txt<"));
    }
}

//! Directory listing generation.
//!
//! Renders an HTML page enumerating a directory's immediate children.
//! Directories are shown and linked with a trailing `/`, symlinks shown with
//! a trailing `@`. Names are HTML-escaped for display and percent-encoded
//! in hrefs.

use std::io;
use std::path::Path;

use tokio::fs;

use crate::http::url;

struct ListingEntry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

/// Read a directory and render its listing page.
///
/// `request_path` is the URL path being served, used for the page title and
/// heading.
pub async fn render_directory(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    let mut reader = fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let file_type = entry.file_type().await?;
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
        });
    }
    Ok(render(request_path, entries))
}

fn render(request_path: &str, mut entries: Vec<ListingEntry>) -> String {
    entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let title = format!("Directory listing for {request_path}");
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&title)));
    html.push_str("<hr>\n<ul>\n");
    for entry in &entries {
        let mut href = url::encode_segment(&entry.name);
        let mut display = entry.name.clone();
        if entry.is_dir {
            href.push('/');
            display.push('/');
        } else if entry.is_symlink {
            display.push('@');
        }
        html.push_str(&format!(
            "<li><a href=\"{href}\">{}</a></li>\n",
            escape_html(&display)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink: false,
        }
    }

    #[test]
    fn test_render_sorts_case_insensitively() {
        let html = render(
            "/",
            vec![entry("zeta.txt", false), entry("Alpha.txt", false)],
        );
        let alpha = html.find("Alpha.txt").unwrap();
        let zeta = html.find("zeta.txt").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_render_marks_directories() {
        let html = render("/", vec![entry("assets", true)]);
        assert!(html.contains("<a href=\"assets/\">assets/</a>"));
    }

    #[test]
    fn test_render_marks_symlinks() {
        let html = render(
            "/",
            vec![ListingEntry {
                name: "link".to_string(),
                is_dir: false,
                is_symlink: true,
            }],
        );
        assert!(html.contains("<a href=\"link\">link@</a>"));
    }

    #[test]
    fn test_render_escapes_and_encodes() {
        let html = render("/", vec![entry("a <b>&c.txt", false)]);
        assert!(html.contains("href=\"a%20%3Cb%3E%26c.txt\""));
        assert!(html.contains(">a &lt;b&gt;&amp;c.txt</a>"));
    }

    #[test]
    fn test_render_titles_request_path() {
        let html = render("/assets/", Vec::new());
        assert!(html.contains("<title>Directory listing for /assets/</title>"));
        assert!(html.contains("<h1>Directory listing for /assets/</h1>"));
    }

    #[tokio::test]
    async fn test_render_directory_enumerates_children() {
        let dir = std::env::temp_dir().join(format!("swserve-listing-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        std::fs::write(dir.join("a.txt"), b"a").unwrap();
        std::fs::write(dir.join("b.txt"), b"b").unwrap();

        let html = render_directory(&dir, "/").await.unwrap();
        assert!(html.contains("a.txt"));
        assert!(html.contains("b.txt"));
        assert!(html.contains("<a href=\"sub/\">sub/</a>"));
        // Immediate children only: three list items
        assert_eq!(html.matches("<li>").count(), 3);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

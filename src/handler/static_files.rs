//! Static file resolution and serving.
//!
//! Maps a decoded URL path onto the document root and classifies it as a
//! file, a directory, a redirect, or not-found. Traversal is rejected twice:
//! structurally when the path is sanitized, and again by a canonicalization
//! check so a symlink cannot lead outside the root.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, mime, url};
use crate::logger;

/// Classified result of resolving a request path against the document root.
#[derive(Debug, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Directory(PathBuf),
    /// Directory requested without its trailing slash.
    Redirect(String),
    NotFound,
}

/// Resolve the request path and serve whatever it names.
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve(&state.root, ctx.path, &state.config.site.index_files).await {
        Target::File(path) => serve_file(ctx, &path).await,
        Target::Directory(path) => serve_listing(ctx, &path).await,
        Target::Redirect(location) => http::build_redirect_response(&location),
        Target::NotFound => http::build_404_response(ctx.is_head),
    }
}

/// Resolve a URL path to a [`Target`].
///
/// `root` must already be canonical. A directory hit without a trailing
/// slash redirects to the slash form; with a slash, the configured index
/// files are probed before falling back to a listing.
pub async fn resolve(root: &Path, request_path: &str, index_files: &[String]) -> Target {
    let Some(relative) = sanitize_path(request_path) else {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return Target::NotFound;
    };

    let full_path = root.join(relative);
    let Ok(metadata) = fs::metadata(&full_path).await else {
        return Target::NotFound;
    };

    if metadata.is_dir() {
        if !request_path.ends_with('/') {
            return Target::Redirect(format!("{request_path}/"));
        }
        for index in index_files {
            let candidate = full_path.join(index);
            if fs::metadata(&candidate)
                .await
                .is_ok_and(|m| m.is_file())
            {
                return confine(root, &candidate, true).await;
            }
        }
        return confine(root, &full_path, false).await;
    }

    if metadata.is_file() {
        return confine(root, &full_path, true).await;
    }

    Target::NotFound
}

/// Decode the URL path and rebuild it as a relative filesystem path.
///
/// Empty and `.` segments are dropped; any `..` segment (including ones
/// introduced by percent-decoding) rejects the whole path.
pub fn sanitize_path(request_path: &str) -> Option<PathBuf> {
    let decoded = url::percent_decode(request_path);
    let mut clean = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            name if name.contains(['\0', '\\']) => return None,
            name => clean.push(name),
        }
    }
    Some(clean)
}

/// Canonicalization backstop: the entry must still live under the root.
async fn confine(root: &Path, path: &Path, is_file: bool) -> Target {
    let Ok(canonical) = fs::canonicalize(path).await else {
        return Target::NotFound;
    };
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Blocked request resolving outside document root: {}",
            path.display()
        ));
        return Target::NotFound;
    }
    if is_file {
        Target::File(canonical)
    } else {
        Target::Directory(canonical)
    }
}

async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::content_type_for(path);
            http::build_file_response(content, content_type, ctx.is_head)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => http::build_404_response(ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to read '{}': {e}", path.display()));
            http::build_500_response(ctx.is_head)
        }
    }
}

async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match listing::render_directory(dir, ctx.path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list '{}': {e}", dir.display()));
            http::build_404_response(ctx.is_head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Disposable directory tree under the system temp dir.
    struct TempTree {
        root: PathBuf,
    }

    impl TempTree {
        fn new(tag: &str) -> Self {
            let root = std::env::temp_dir().join(format!("swserve-{tag}-{}", std::process::id()));
            let _ = std::fs::remove_dir_all(&root);
            std::fs::create_dir_all(root.join("assets")).unwrap();
            std::fs::write(root.join("index.html"), b"<h1>home</h1>").unwrap();
            std::fs::write(root.join("assets/app.js"), b"console.log(1);").unwrap();
            let root = root.canonicalize().unwrap();
            Self { root }
        }
    }

    impl Drop for TempTree {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    const INDEX_FILES: &[String] = &[];

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string(), "index.htm".to_string()]
    }

    #[test]
    fn test_sanitize_plain_paths() {
        assert_eq!(sanitize_path("/"), Some(PathBuf::new()));
        assert_eq!(sanitize_path("/a/b.txt"), Some(PathBuf::from("a/b.txt")));
        assert_eq!(sanitize_path("//a//b/"), Some(PathBuf::from("a/b")));
        assert_eq!(sanitize_path("/./a/./b"), Some(PathBuf::from("a/b")));
    }

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert_eq!(sanitize_path("/../etc/passwd"), None);
        assert_eq!(sanitize_path("/a/../../b"), None);
        assert_eq!(sanitize_path("/%2e%2e/secret"), None);
        assert_eq!(sanitize_path("/a%2F..%2Fb"), None);
        assert_eq!(sanitize_path("/a\\..\\b"), None);
    }

    #[test]
    fn test_sanitize_decodes_names() {
        assert_eq!(sanitize_path("/a%20b.txt"), Some(PathBuf::from("a b.txt")));
    }

    #[tokio::test]
    async fn test_resolve_file() {
        let tree = TempTree::new("resolve-file");
        let target = resolve(&tree.root, "/assets/app.js", INDEX_FILES).await;
        assert_eq!(target, Target::File(tree.root.join("assets/app.js")));
    }

    #[tokio::test]
    async fn test_resolve_missing_is_not_found() {
        let tree = TempTree::new("resolve-missing");
        let target = resolve(&tree.root, "/nope.txt", INDEX_FILES).await;
        assert_eq!(target, Target::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_traversal_is_not_found() {
        let tree = TempTree::new("resolve-traversal");
        let target = resolve(&tree.root, "/../../etc/passwd", INDEX_FILES).await;
        assert_eq!(target, Target::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_directory_without_slash_redirects() {
        let tree = TempTree::new("resolve-redirect");
        let target = resolve(&tree.root, "/assets", INDEX_FILES).await;
        assert_eq!(target, Target::Redirect("/assets/".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_root_finds_index() {
        let tree = TempTree::new("resolve-index");
        let target = resolve(&tree.root, "/", &index_files()).await;
        assert_eq!(target, Target::File(tree.root.join("index.html")));
    }

    #[tokio::test]
    async fn test_resolve_directory_without_index_lists() {
        let tree = TempTree::new("resolve-listing");
        let target = resolve(&tree.root, "/assets/", &index_files()).await;
        assert_eq!(target, Target::Directory(tree.root.join("assets")));
    }
}

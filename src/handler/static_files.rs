//! Static file fallback module
//!
//! Serves the companion web page (and anything else under the configured
//! root) for GET/HEAD requests no route claims.

use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve `path` from `root`, honoring index files and HEAD semantics.
pub async fn serve(
    root: &str,
    path: &str,
    index_files: &[String],
    is_head: bool,
) -> Response<Full<Bytes>> {
    match load(root, path, index_files).await {
        Some((content, content_type)) => http::build_file_response(content, content_type, is_head),
        None => http::build_404_response(),
    }
}

/// Resolve and read a file beneath `root`.
///
/// Returns `None` for everything that should surface as a 404, including
/// blocked traversal attempts.
async fn load(root: &str, path: &str, index_files: &[String]) -> Option<(Vec<u8>, &'static str)> {
    let mut file_path = resolve_path(root, path);

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!("Static root not accessible '{root}': {e}"));
            return None;
        }
    };

    // Directory requests try the configured index files in order
    if file_path.is_dir() {
        file_path = pick_index_file(&file_path, index_files)?;
    }

    // Missing file is the common 404, not worth a log line
    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Map a request path onto the static root.
fn resolve_path(root: &str, path: &str) -> PathBuf {
    let clean = path.trim_start_matches('/').replace("..", "");
    Path::new(root).join(clean)
}

fn pick_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_strips_leading_slash() {
        assert_eq!(
            resolve_path("site", "/page.html"),
            PathBuf::from("site/page.html")
        );
    }

    #[test]
    fn resolve_neutralizes_dotdot_segments() {
        let resolved = resolve_path("site", "/../../etc/passwd");
        assert!(!resolved.to_string_lossy().contains(".."));
    }

    #[test]
    fn root_path_maps_to_root_dir() {
        assert_eq!(resolve_path("site", "/"), PathBuf::from("site"));
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let resp = serve(".", "/definitely-not-here.html", &[], false).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn existing_file_is_served_with_content_type() {
        // Cargo.toml always exists next to the test working directory
        let resp = serve(".", "/Cargo.toml", &[], false).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn head_request_gets_empty_body() {
        use http_body_util::BodyExt;

        let resp = serve(".", "/Cargo.toml", &[], true).await;
        assert_eq!(resp.status(), 200);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}

//! Static preview server for a built site

use anyhow::{bail, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Files under `serve_dir`; unknown paths fall back to `index.html`
/// (404 if that is missing too).
fn static_files(serve_dir: &Path) -> ServeDir<ServeFile> {
    let index = ServeFile::new(serve_dir.join("index.html"));
    ServeDir::new(serve_dir)
        .append_index_html_on_directories(true)
        .fallback(index)
}

/// Build the router serving `serve_dir`
pub fn router(serve_dir: &Path) -> Router {
    Router::new()
        .fallback_service(static_files(serve_dir))
        .layer(TraceLayer::new_for_http())
}

/// Serve `serve_dir` on localhost until Ctrl+C
pub async fn start(serve_dir: &Path, port: u16, watch: bool) -> Result<()> {
    if !serve_dir.exists() {
        bail!(
            "Directory {:?} doesn't exist. Run `alxblg build` first, or pass --directory.",
            serve_dir
        );
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    println!("Development server running at http://localhost:{}", port);
    println!("Serving: {}", serve_dir.display());
    if watch {
        tracing::warn!("--watch is not supported; rebuild with `alxblg build` after changes");
    }
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router(serve_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("Shutting down development server...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::fs;

    async fn get(serve_dir: &Path, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = static_files(serve_dir).try_call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn test_serves_files_and_falls_back_to_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::write(dir.path().join("posts/hi.html"), "hi page").unwrap();

        assert_eq!(get(dir.path(), "/").await, (StatusCode::OK, "home".to_string()));
        assert_eq!(
            get(dir.path(), "/posts/hi.html").await,
            (StatusCode::OK, "hi page".to_string())
        );
        assert_eq!(
            get(dir.path(), "/some/route").await,
            (StatusCode::OK, "home".to_string())
        );
    }

    #[tokio::test]
    async fn test_not_found_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _) = get(dir.path(), "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(start(&dir.path().join("public"), 0, false).await.is_err());
    }
}

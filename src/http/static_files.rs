//! Static asset serving.
//!
//! Assets are served from one of two interchangeable sources selected by
//! configuration: the `dist` tree embedded into the binary at build time
//! (default, so the server works from any directory), or a directory root
//! resolved at runtime via `ServeDir`. Both resolve a request path to file
//! bytes with content-type inference and fall back to a plain 404 when the
//! path has no match.

use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use tower_http::services::ServeDir;

use crate::config::{AssetConfig, AssetSource};
use crate::state::AppState;

/// Pre-built static assets embedded at compile time.
#[derive(RustEmbed)]
#[folder = "dist/"]
struct DistAssets;

/// Create the asset routes for the configured source.
///
/// The returned router carries only a fallback, so any path not claimed by
/// an explicit route resolves against the asset tree.
pub fn asset_routes(assets: &AssetConfig) -> Router<AppState> {
    match assets.source {
        AssetSource::Embedded => Router::new().fallback(get(serve_embedded)),
        AssetSource::Directory => {
            Router::new().fallback_service(ServeDir::new(&assets.directory))
        }
    }
}

/// Serve a file from the embedded asset tree.
async fn serve_embedded(uri: Uri) -> Response {
    let path = normalize_path(uri.path());

    match DistAssets::get(&path) {
        Some(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            let body = match file.data {
                std::borrow::Cow::Borrowed(bytes) => Body::from(bytes),
                std::borrow::Cow::Owned(bytes) => Body::from(bytes),
            };
            ([(header::CONTENT_TYPE, mime.as_ref())], body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Map a request path onto an embedded file path. The root and any
/// directory-style path resolve to that directory's `index.html`.
fn normalize_path(uri_path: &str) -> String {
    let path = uri_path.trim_start_matches('/');
    if path.is_empty() {
        "index.html".to_string()
    } else if path.ends_with('/') {
        format!("{path}index.html")
    } else {
        path.to_string()
    }
}

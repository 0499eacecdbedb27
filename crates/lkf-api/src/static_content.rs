//! Static Content
//!
//! Dashboard documents and assets served from a content root injected at
//! startup. Paths are never resolved relative to the source tree or the
//! working directory of the binary. A missing file is a 404.

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::warn;

const INDEX_FILE: &str = "index.html";
const ASSETS_DIR: &str = "static";
const MAP_FILE: &str = "dashboard.html";

/// Resolved locations under the content root
#[derive(Debug, Clone)]
pub struct StaticContent {
    root: Arc<PathBuf>,
}

impl StaticContent {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: Arc::new(root.into()) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Main dashboard document, served at `/` and `/dashboard`
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    /// Station map document, served at `/demo/stations`
    pub fn map_path(&self) -> PathBuf {
        self.assets_dir().join(MAP_FILE)
    }

    /// Router for the dashboard pages and `/static` assets
    pub fn router(&self) -> Router {
        for path in [self.index_path(), self.map_path()] {
            if !path.is_file() {
                warn!("Static document missing, will answer 404: {}", path.display());
            }
        }

        Router::new()
            .route("/", get(index))
            .route("/dashboard", get(dashboard))
            .route("/demo/stations", get(demo_stations))
            .with_state(self.clone())
            .nest_service("/static", ServeDir::new(self.assets_dir()))
    }
}

async fn serve_file(path: PathBuf, request: Request) -> Response {
    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

async fn index(State(content): State<StaticContent>, request: Request) -> Response {
    serve_file(content.index_path(), request).await
}

/// Main dashboard page
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard HTML", content_type = "text/html", body = String),
        (status = 404, description = "Dashboard document not installed")
    )
)]
pub async fn dashboard(State(content): State<StaticContent>, request: Request) -> Response {
    serve_file(content.index_path(), request).await
}

/// Station map page
#[utoipa::path(
    get,
    path = "/demo/stations",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Station map HTML", content_type = "text/html", body = String),
        (status = 404, description = "Map document not installed")
    )
)]
pub async fn demo_stations(State(content): State<StaticContent>, request: Request) -> Response {
    serve_file(content.map_path(), request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_root() {
        let content = StaticContent::new("/srv/flood");
        assert_eq!(content.root(), Path::new("/srv/flood"));
        assert_eq!(content.index_path(), PathBuf::from("/srv/flood/index.html"));
        assert_eq!(content.map_path(), PathBuf::from("/srv/flood/static/dashboard.html"));
    }
}

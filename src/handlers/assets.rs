use crate::config::Config;
use crate::error::AppError;
use ntex::web::{self, HttpResponse};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Joins a request path onto the asset root, refusing anything that could
/// step outside it.
fn resolve(root: &Path, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

fn serve_file(path: &Path) -> Result<HttpResponse, AppError> {
    if !path.is_file() {
        return Err(AppError::NotFound("not found".into()));
    }
    let bytes = std::fs::read(path)?;
    Ok(HttpResponse::Ok().content_type(content_type(path)).body(bytes))
}

pub async fn index(config: web::types::State<Arc<Config>>) -> Result<HttpResponse, AppError> {
    serve_file(&config.static_dir.join("index.html"))
}

pub async fn static_file(
    config: web::types::State<Arc<Config>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let requested = path.into_inner();
    let file = resolve(&config.static_dir, &requested).ok_or_else(|| AppError::NotFound("not found".into()))?;
    serve_file(&file)
}

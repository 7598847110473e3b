use crate::error::AppError;
use crate::store::Store;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn export_json(store: web::types::State<Arc<Store>>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(&store.read()))
}

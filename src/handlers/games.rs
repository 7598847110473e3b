use crate::error::AppError;
use crate::models::game::*;
use crate::services::games as service;
use crate::store::Store;
use crate::validation;
use ntex::util::Bytes;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn create_game(
    store: web::types::State<Arc<Store>>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let req: CreateGameRequest = validation::parse_json_body(&body)?;
    let game = service::create_game(&store, req)?;
    Ok(HttpResponse::Created().json(&game))
}

pub async fn list_games(
    store: web::types::State<Arc<Store>>,
    query: web::types::Query<GamesQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = validation::parse_int_param(
        query.limit.as_deref(),
        service::DEFAULT_PAGE_LIMIT,
        "limit/offset must be int",
    )?;
    let offset = validation::parse_int_param(query.offset.as_deref(), 0, "limit/offset must be int")?;
    Ok(HttpResponse::Ok().json(&service::list_games(&store, limit, offset)))
}

pub async fn get_game(
    store: web::types::State<Arc<Store>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let game = service::get_game(&store, &game_id)?;
    Ok(HttpResponse::Ok().json(&game))
}

use crate::error::AppError;
use crate::models::highscore::*;
use crate::services::highscores as service;
use crate::store::Store;
use crate::validation;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn get_highscores(
    store: web::types::State<Arc<Store>>,
    query: web::types::Query<HighscoreQuery>,
) -> Result<HttpResponse, AppError> {
    let scope = Scope::parse(query.scope.as_deref().unwrap_or("global"));
    let agent_type = query.agent_type.as_deref().filter(|s| !s.is_empty());
    let limit = validation::parse_int_param(query.limit.as_deref(), service::DEFAULT_LIMIT, "limit must be int")?;

    let db = store.read();
    let items = service::highscores(&db, scope, agent_type, limit);
    Ok(HttpResponse::Ok().json(&HighscoreList { items }))
}

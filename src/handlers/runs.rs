use crate::error::AppError;
use crate::models::run::*;
use crate::services::runs as service;
use crate::store::Store;
use crate::validation;
use ntex::util::Bytes;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn submit_run(
    store: web::types::State<Arc<Store>>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let req: RunSubmission = validation::parse_json_body(&body)?;
    let run = service::submit_run(&store, req)?;
    Ok(HttpResponse::Created().json(&run))
}

pub async fn list_runs(
    store: web::types::State<Arc<Store>>,
    query: web::types::Query<RunsQuery>,
) -> Result<HttpResponse, AppError> {
    // Empty filter values mean "no filter".
    let game_id = query.game_id.as_deref().filter(|s| !s.is_empty());
    let agent_type = query.agent_type.as_deref().filter(|s| !s.is_empty());
    Ok(HttpResponse::Ok().json(&service::list_runs(&store, game_id, agent_type)))
}

use crate::error::AppError;
use crate::models::run::*;
use crate::services::distance;
use crate::store::Store;
use crate::validation;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

fn missing_fields(req: &RunSubmission) -> Vec<String> {
    [
        ("game_id", req.game_id.is_none()),
        ("player_name", req.player_name.is_none()),
        ("agent_type", req.agent_type.is_none()),
        ("distance", req.distance.is_none()),
        ("route", req.route.is_none()),
    ]
    .iter()
    .filter(|(_, missing)| *missing)
    .map(|(name, _)| name.to_string())
    .collect()
}

pub fn submit_run(store: &Store, req: RunSubmission) -> Result<Run, AppError> {
    let missing = missing_fields(&req);
    let (Some(game_id), Some(player_name), Some(agent_type), Some(claimed), Some(route)) =
        (req.game_id, req.player_name, req.agent_type, req.distance, req.route)
    else {
        return Err(AppError::MissingFields(missing));
    };
    // Game ids are always strings, so anything else cannot name a game.
    let Value::String(game_id) = game_id else {
        return Err(AppError::NotFound("game_id not found".into()));
    };
    let player_name = validation::validate_label("player_name", &player_name)?;
    let agent_type = validation::validate_label("agent_type", &agent_type)?;
    let claimed = validation::validate_distance(&claimed)?;
    let route = validation::validate_route(route)?;
    let compute_time_ms = validation::validate_compute_time(req.compute_time_ms.as_ref())?;

    // Games are never modified, so looking it up outside the write lock is safe.
    let db = store.read();
    let game = db
        .find_game(&game_id)
        .ok_or_else(|| AppError::NotFound("game_id not found".into()))?;

    let index = distance::index_cities(&game.cities);
    let recomputed = distance::route_distance(&index, &route);
    if recomputed.is_none() {
        log::debug!("run on game {} has an unverifiable route", game_id);
    }

    let run = Run {
        id: Uuid::new_v4().to_string(),
        game_id,
        player_name,
        agent_type,
        distance: recomputed.unwrap_or(claimed),
        verified: recomputed.is_some(),
        route,
        num_cities: game.cities.len(),
        compute_time_ms,
        created_at: Utc::now().timestamp_millis(),
    };

    store.mutate(|db| db.runs.push(run.clone()))?;
    log::info!(
        "run {} on game {}: {} by {} (verified: {})",
        run.id,
        run.game_id,
        run.distance,
        run.agent_type,
        run.verified
    );
    Ok(run)
}

/// Runs matching every given filter, in submission order.
pub fn list_runs(store: &Store, game_id: Option<&str>, agent_type: Option<&str>) -> RunList {
    let items: Vec<Run> = store
        .read()
        .runs
        .into_iter()
        .filter(|r| game_id.map_or(true, |g| r.game_id == g))
        .filter(|r| agent_type.map_or(true, |a| r.agent_type == a))
        .collect();
    RunList {
        total: items.len(),
        items,
    }
}

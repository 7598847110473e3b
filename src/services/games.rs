use crate::error::AppError;
use crate::models::game::*;
use crate::services::slice_window;
use crate::store::Store;
use crate::validation;
use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_PAGE_LIMIT: i64 = 50;

pub fn create_game(store: &Store, req: CreateGameRequest) -> Result<Game, AppError> {
    let cities = validation::validate_cities(req.cities)?;
    let game = Game {
        id: Uuid::new_v4().to_string(),
        name: validation::validate_game_name(req.name.as_deref()),
        cities,
        meta: req.meta.unwrap_or_default(),
        created_at: Utc::now().timestamp_millis(),
    };

    store.mutate(|db| db.games.push(game.clone()))?;
    log::info!("created game {} ({} cities)", game.id, game.cities.len());
    Ok(game)
}

/// Insertion-ordered page of games; `total` counts every stored game.
/// Negative bounds count from the end.
pub fn list_games(store: &Store, limit: i64, offset: i64) -> GamePage {
    let mut games = store.read().games;
    let total = games.len();
    let window = slice_window(total, offset, offset.saturating_add(limit));
    let items = games.drain(window).collect();
    GamePage { total, items }
}

pub fn get_game(store: &Store, game_id: &str) -> Result<Game, AppError> {
    store
        .read()
        .games
        .into_iter()
        .find(|g| g.id == game_id)
        .ok_or_else(|| AppError::NotFound("not found".into()))
}

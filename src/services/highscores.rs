use crate::models::highscore::Scope;
use crate::models::run::Run;
use crate::models::Database;
use crate::services::slice_window;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: i64 = 20;

/// Fills `num_cities` for runs stored before the field existed, using the
/// referenced game's current size (0 if the game is gone).
pub fn backfill(mut run: Run, city_counts: &HashMap<&str, usize>) -> Run {
    if run.num_cities == 0 {
        run.num_cities = city_counts.get(run.game_id.as_str()).copied().unwrap_or(0);
    }
    run
}

/// Keeps the shortest run of each game. An equal distance never displaces
/// the run seen first; games keep their first-seen order.
fn best_per_game(runs: Vec<Run>) -> Vec<Run> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut best: Vec<Run> = Vec::new();
    for run in runs {
        match slots.get(&run.game_id) {
            Some(&i) => {
                if run.distance < best[i].distance {
                    best[i] = run;
                }
            }
            None => {
                slots.insert(run.game_id.clone(), best.len());
                best.push(run);
            }
        }
    }
    best
}

/// More cities first, then shorter distance. Stable for everything else.
fn rank_order(a: &Run, b: &Run) -> Ordering {
    b.num_cities
        .cmp(&a.num_cities)
        .then_with(|| a.distance.total_cmp(&b.distance))
}

/// A negative `limit` drops that many entries from the end.
pub fn highscores(db: &Database, scope: Scope, agent_type: Option<&str>, limit: i64) -> Vec<Run> {
    let city_counts: HashMap<&str, usize> = db
        .games
        .iter()
        .map(|g| (g.id.as_str(), g.cities.len()))
        .collect();

    let enriched: Vec<Run> = db
        .runs
        .iter()
        .cloned()
        .map(|r| backfill(r, &city_counts))
        .filter(|r| agent_type.map_or(true, |a| r.agent_type == a))
        .collect();

    let mut items = match scope {
        Scope::PerGame => best_per_game(enriched),
        Scope::Global => enriched,
    };
    items.sort_by(rank_order);
    let keep = slice_window(items.len(), 0, limit).end;
    items.truncate(keep);
    items
}

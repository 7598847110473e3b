pub mod game;
pub mod highscore;
pub mod run;

use serde::{Deserialize, Serialize};

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub games: Vec<game::Game>,
    #[serde(default)]
    pub runs: Vec<run::Run>,
}

impl Database {
    pub fn find_game(&self, id: &str) -> Option<&game::Game> {
        self.games.iter().find(|g| g.id == id)
    }
}

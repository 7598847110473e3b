use super::run::Run;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    PerGame,
}

impl Scope {
    /// Unknown values fall back to the global leaderboard.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "per_game" => Scope::PerGame,
            _ => Scope::Global,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HighscoreQuery {
    pub scope: Option<String>,
    pub agent_type: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HighscoreList {
    pub items: Vec<Run>,
}

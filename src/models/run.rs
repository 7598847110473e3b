use super::game::CityId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub game_id: String,
    pub player_name: String,
    pub agent_type: String,
    pub distance: f64,
    #[serde(default)]
    pub verified: bool,
    pub route: Vec<CityId>,
    // Zero means the run predates the field; ranking backfills it.
    #[serde(default)]
    pub num_cities: usize,
    #[serde(default)]
    pub compute_time_ms: i64,
    #[serde(default)]
    pub created_at: i64,
}

/// Raw submission. A key that is absent stays `None`; a key sent as `null`
/// is `Some(Value::Null)`, so only truly absent keys count as missing.
#[derive(Debug, Default, Deserialize)]
pub struct RunSubmission {
    #[serde(default, deserialize_with = "present")]
    pub game_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub player_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub agent_type: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub distance: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub route: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub compute_time_ms: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct RunsQuery {
    pub game_id: Option<String>,
    pub agent_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunList {
    pub total: usize,
    pub items: Vec<Run>,
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// City identifier as sent by clients. Integers and strings are the usual
/// forms; anything else is kept verbatim so a route can still reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CityId {
    Int(i64),
    Text(String),
    Other(Value),
}

/// Comparison key: integral floats (`1.0`) match the integer id `1`.
#[derive(PartialEq, Eq, Hash)]
enum IdKey<'a> {
    Int(i64),
    Float(u64),
    Text(&'a str),
    Json(String),
}

impl CityId {
    fn key(&self) -> IdKey<'_> {
        match self {
            CityId::Int(n) => IdKey::Int(*n),
            CityId::Text(s) => IdKey::Text(s),
            CityId::Other(Value::Number(n)) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    IdKey::Int(f as i64)
                }
                Some(f) => IdKey::Float(f.to_bits()),
                None => IdKey::Json(n.to_string()),
            },
            CityId::Other(v) => IdKey::Json(v.to_string()),
        }
    }
}

impl PartialEq for CityId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CityId {}

impl Hash for CityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityId::Int(n) => write!(f, "{}", n),
            CityId::Text(s) => f.write_str(s),
            CityId::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Coordinates keep the number exactly as submitted; extra keys ride along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub x: Number,
    pub y: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl City {
    pub fn point(&self) -> (f64, f64) {
        (
            self.x.as_f64().unwrap_or_default(),
            self.y.as_f64().unwrap_or_default(),
        )
    }
}

#[cfg(test)]
impl City {
    pub fn at(id: CityId, x: f64, y: f64) -> Self {
        City {
            id,
            x: Number::from_f64(x).unwrap_or_else(|| 0.into()),
            y: Number::from_f64(y).unwrap_or_else(|| 0.into()),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub cities: Vec<City>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub name: Option<String>,
    pub cities: Option<Vec<City>>,
    pub meta: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct GamesQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GamePage {
    pub total: usize,
    pub items: Vec<Game>,
}

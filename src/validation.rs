use crate::error::AppError;
use crate::models::game::{City, CityId};
use serde_json::Value;
use std::collections::HashSet;

const MIN_CITIES: usize = 3;
const DEFAULT_GAME_NAME: &str = "Untitled";

pub fn validate_game_name(name: Option<&str>) -> String {
    let trimmed = name.unwrap_or_default().trim();
    if trimmed.is_empty() {
        DEFAULT_GAME_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn validate_cities(cities: Option<Vec<City>>) -> Result<Vec<City>, AppError> {
    let cities = match cities {
        Some(c) if c.len() >= MIN_CITIES => c,
        _ => return Err(AppError::BadRequest("Need at least 3 cities".into())),
    };
    let mut seen = HashSet::with_capacity(cities.len());
    for city in &cities {
        if !seen.insert(&city.id) {
            return Err(AppError::BadRequest(format!("Duplicate city id: {}", city.id)));
        }
    }
    Ok(cities)
}

/// Display strings accept any scalar; numbers and booleans keep their JSON text.
pub fn validate_label(field: &str, value: &Value) -> Result<String, AppError> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return Err(AppError::BadRequest(format!("{} must be a string", field))),
    };
    Ok(text.trim().to_string())
}

/// Client-claimed distance: a JSON number or a numeric string, and finite.
/// Strings such as "inf" or "NaN" parse as floats, so the finite check matters.
pub fn validate_distance(value: &Value) -> Result<f64, AppError> {
    let distance = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match distance {
        Some(d) if d.is_finite() => Ok(d),
        _ => Err(AppError::BadRequest("distance must be a finite number".into())),
    }
}

/// Solving time in whole milliseconds. Absent or falsy values mean 0;
/// fractional numbers truncate; strings must hold an integer.
pub fn validate_compute_time(value: Option<&Value>) -> Result<i64, AppError> {
    let invalid = || AppError::BadRequest("compute_time_ms must be an integer".into());
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Bool(b)) => Ok(i64::from(*b)),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(ms), _) => Ok(ms),
            (None, Some(ms)) if ms.is_finite() => Ok(ms as i64),
            _ => Err(invalid()),
        },
        Some(Value::String(s)) if s.is_empty() => Ok(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

/// A route must be a list; its entries may be any JSON value.
pub fn validate_route(value: Value) -> Result<Vec<CityId>, AppError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value::<CityId>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::BadRequest(format!("Invalid route: {}", e))),
        _ => Err(AppError::BadRequest("route must be a list".into())),
    }
}

/// Parses an optional integer query parameter. Negative values are kept and
/// count from the end when used as slice bounds.
pub fn parse_int_param(raw: Option<&str>, default: i64, message: &str) -> Result<i64, AppError> {
    match raw {
        None => Ok(default),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest(message.into())),
    }
}

/// Decodes a JSON request body regardless of its declared content type.
pub fn parse_json_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

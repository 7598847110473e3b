use crate::models::game::{City, CityId};
use std::collections::HashMap;

pub type CityIndex<'a> = HashMap<&'a CityId, &'a City>;

pub fn index_cities(cities: &[City]) -> CityIndex<'_> {
    cities.iter().map(|c| (&c.id, c)).collect()
}

fn euclidean(a: &City, b: &City) -> f64 {
    let (ax, ay) = a.point();
    let (bx, by) = b.point();
    (ax - bx).hypot(ay - by)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Length of `route` walked as an open path (no edge back to the start),
/// rounded to 4 decimals. `None` if any step references an unknown city.
pub fn route_distance(cities: &CityIndex<'_>, route: &[CityId]) -> Option<f64> {
    let mut total = 0.0;
    for pair in route.windows(2) {
        let a = cities.get(&pair[0])?;
        let b = cities.get(&pair[1])?;
        total += euclidean(a, b);
    }
    Some(round4(total))
}

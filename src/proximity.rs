//! Distance annotation and ordering of places around a user coordinate.
//!
//! Everything here is a pure function of its inputs; callers fetch places and
//! rating aggregates first, then rank and filter the enriched summaries.

use std::cmp::Ordering;

use crate::domain::geo::Coordinate;
use crate::domain::place::PlaceSummary;
use crate::domain::types::CategoryId;

/// Mean earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius of the "nearby" view.
pub const NEARBY_RADIUS_KM: f64 = 5.0;

/// Great-circle distance between two coordinates in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

fn by_distance(a: &PlaceSummary, b: &PlaceSummary) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Attaches distances from `origin` and sorts ascending.
///
/// Places without coordinates keep `distance_km = None` and go last. Ties keep
/// their input order. Without an origin the input is returned untouched.
pub fn rank(mut places: Vec<PlaceSummary>, origin: Option<Coordinate>) -> Vec<PlaceSummary> {
    let Some(origin) = origin else {
        return places;
    };

    for summary in &mut places {
        summary.distance_km = summary
            .place
            .coordinate
            .map(|coordinate| distance_km(origin, coordinate));
    }
    places.sort_by(by_distance);
    places
}

/// Keeps entries with a known distance no greater than `max_km`.
pub fn filter_by_radius(ranked: Vec<PlaceSummary>, max_km: f64) -> Vec<PlaceSummary> {
    ranked
        .into_iter()
        .filter(|summary| summary.distance_km.is_some_and(|d| d <= max_km))
        .collect()
}

/// Keeps entries attached to `category_id`; `None` keeps everything.
pub fn filter_by_category(
    ranked: Vec<PlaceSummary>,
    category_id: Option<CategoryId>,
) -> Vec<PlaceSummary> {
    match category_id {
        Some(category_id) => ranked
            .into_iter()
            .filter(|summary| summary.place.category_id == Some(category_id))
            .collect(),
        None => ranked,
    }
}

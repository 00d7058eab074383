use crate::{Airport, GeoPoint};

/// Airports with a runway strictly longer than `min_runway_m`, closest first.
///
/// Distances are computed once and sorted with a total order; the sort is
/// stable, so equidistant airports keep their input order.
pub fn rank_by_distance<'a>(
    origin: GeoPoint,
    airports: &'a [Airport],
    min_runway_m: f64,
) -> Vec<(&'a Airport, f64)> {
    let mut ranked: Vec<(&Airport, f64)> = airports
        .iter()
        .filter(|apt| apt.longest_runway_m() > min_runway_m)
        .map(|apt| (apt, apt.distance_to_point(origin)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

/// The closest airport passing the runway filter.
pub fn rank_nearest(origin: GeoPoint, airports: &[Airport], min_runway_m: f64) -> Option<&Airport> {
    rank_by_distance(origin, airports, min_runway_m)
        .into_iter()
        .next()
        .map(|(apt, _)| apt)
}

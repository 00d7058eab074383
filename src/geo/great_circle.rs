use crate::GeoPoint;

/// Mean earth radius used for all great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lon = (b.lon_deg - a.lon_deg).to_radians();

    let sin_dlat = (d_lat / 2.0).sin();
    let sin_dlon = (d_lon / 2.0).sin();
    let h = sin_dlat * sin_dlat
        + a.lat_deg.to_radians().cos() * b.lat_deg.to_radians().cos() * sin_dlon * sin_dlon;

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Unit vector of a point on the sphere (x towards lat 0/lon 0, z towards the north pole).
pub fn unit_vector(p: GeoPoint) -> [f64; 3] {
    let lat = p.lat_deg.to_radians();
    let lon = p.lon_deg.to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Straight-line distance through a unit sphere that corresponds to a surface
/// distance of `km`. Chord length grows monotonically with arc length, so
/// radius queries in 3D select the same points as great-circle radius queries.
pub fn chord_for_km(km: f64) -> f64 {
    let central_angle = (km / EARTH_RADIUS_KM).min(std::f64::consts::PI);
    2.0 * (central_angle / 2.0).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert_approx_eq!(d, 111.19, 0.5);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let eham = GeoPoint::new(52.3086, 4.7639);
        let kjfk = GeoPoint::new(40.6398, -73.7789);
        assert_eq!(distance_km(eham, eham), 0.0);
        assert_eq!(distance_km(kjfk, kjfk), 0.0);
        assert_approx_eq!(distance_km(eham, kjfk), distance_km(kjfk, eham), 1e-9);
        assert_approx_eq!(distance_km(eham, kjfk), 5847.5, 1.0);
    }

    #[test]
    fn antipodes_are_half_circumference_apart() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert_approx_eq!(d, std::f64::consts::PI * EARTH_RADIUS_KM, 1e-6);
    }

    #[test]
    fn chord_matches_unit_vector_distance() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(12.5, 18.0);
        let (va, vb) = (unit_vector(a), unit_vector(b));
        let chord = ((va[0] - vb[0]).powi(2) + (va[1] - vb[1]).powi(2) + (va[2] - vb[2]).powi(2)).sqrt();
        assert_approx_eq!(chord, chord_for_km(distance_km(a, b)), 1e-9);
    }
}

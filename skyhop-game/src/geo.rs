//! Great-circle distance.

/// Mean Earth radius (IUGG) in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

/// Haversine distance in kilometres between two `(lat, lon)` points in degrees.
#[must_use]
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_same_point() {
        assert!(distance_km((60.3172, 24.9633), (60.3172, 24.9633)).abs() < 1e-9);
    }

    #[test]
    fn symmetric() {
        let hel = (60.3172, 24.9633);
        let rov = (66.5648, 25.8304);
        let there = distance_km(hel, rov);
        let back = distance_km(rov, hel);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn helsinki_to_oulu_is_about_500_km() {
        let d = distance_km((60.3172, 24.9633), (64.9301, 25.3546));
        assert!((510.0..520.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance_km((60.0, 24.0), (61.0, 24.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }
}

//! Static team metadata: arena coordinates for travel-distance features.

/// (abbrev, arena latitude, arena longitude)
const ARENAS: &[(&str, f64, f64)] = &[
    ("ATL", 33.7573, -84.3963),
    ("BOS", 42.3662, -71.0621),
    ("BKN", 40.6826, -73.9754),
    ("CHA", 35.2251, -80.8392),
    ("CHI", 41.8807, -87.6742),
    ("CLE", 41.4965, -81.6882),
    ("DAL", 32.7905, -96.8103),
    ("DEN", 39.7487, -105.0077),
    ("DET", 42.3410, -83.0550),
    ("GSW", 37.7680, -122.3877),
    ("HOU", 29.7508, -95.3621),
    ("IND", 39.7640, -86.1555),
    ("LAC", 33.9425, -118.3418),
    ("LAL", 34.0430, -118.2673),
    ("MEM", 35.1382, -90.0506),
    ("MIA", 25.7814, -80.1870),
    ("MIL", 43.0451, -87.9173),
    ("MIN", 44.9795, -93.2760),
    ("NOP", 29.9490, -90.0821),
    ("NYK", 40.7505, -73.9934),
    ("OKC", 35.4634, -97.5151),
    ("ORL", 28.5392, -81.3839),
    ("PHI", 39.9012, -75.1720),
    ("PHX", 33.4457, -112.0712),
    ("POR", 45.5316, -122.6668),
    ("SAC", 38.5802, -121.4997),
    ("SAS", 29.4270, -98.4375),
    ("TOR", 43.6435, -79.3791),
    ("UTA", 40.7683, -111.9011),
    ("WAS", 38.8981, -77.0209),
];

/// Arena coordinates for a team abbreviation, if known.
pub fn arena_coords(abbrev: &str) -> Option<(f64, f64)> {
    ARENAS
        .iter()
        .find(|(a, _, _)| *a == abbrev)
        .map(|(_, lat, lon)| (*lat, *lon))
}

/// Great-circle distance in kilometers between two (lat, lon) points.
pub fn distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knows_all_thirty_teams() {
        assert_eq!(ARENAS.len(), 30);
        assert!(arena_coords("BOS").is_some());
        assert!(arena_coords("SEA").is_none());
    }

    #[test]
    fn boston_to_la_is_about_4200km() {
        let bos = arena_coords("BOS").unwrap();
        let lal = arena_coords("LAL").unwrap();
        let d = distance_km(bos, lal);
        assert!((4100.0..4300.0).contains(&d), "got {d}");
    }

    #[test]
    fn zero_distance_same_arena() {
        let bos = arena_coords("BOS").unwrap();
        assert!(distance_km(bos, bos) < 1e-9);
    }
}

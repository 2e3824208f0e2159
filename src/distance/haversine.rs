use crate::config::constant::EARTH_RADIUS_KM;
use crate::domain::types::Coordinate;

/// Great-circle distance in kilometres between two coordinates (haversine formula).
pub fn haversine(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn random_coordinate(rng: &mut ChaCha8Rng) -> Coordinate {
        Coordinate::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
    }

    #[test]
    fn distance_to_self_is_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(64);
        for _ in 0..200 {
            let a = random_coordinate(&mut rng);
            assert_eq!(haversine(a, a), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..200 {
            let a = random_coordinate(&mut rng);
            let b = random_coordinate(&mut rng);
            assert!((haversine(a, b) - haversine(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn one_degree_on_the_equator() {
        let d = haversine(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn known_city_pair() {
        // Sao Paulo to Campinas is roughly 84 km as the crow flies.
        let sao_paulo = Coordinate::new(-23.5505, -46.6333);
        let campinas = Coordinate::new(-22.9099, -47.0626);
        let d = haversine(sao_paulo, campinas);
        assert!((80.0..90.0).contains(&d), "got {d}");
    }

    #[test]
    fn antipodes_are_half_the_circumference() {
        let d = haversine(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}

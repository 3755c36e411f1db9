use super::model::{
    CategorizedPlanet, Category, DerivedColumns, GravityClass, PlanetRecord, StarSize, Status,
    TemperatureClass,
};

// ---------------------------------------------------------------------------
// Bucket edges
// ---------------------------------------------------------------------------

/// Interior edges between star-size buckets (solar radii).
pub const STAR_SIZE_EDGES: [f64; 2] = [0.8, 1.2];

/// Interior edges between temperature buckets (K).
pub const TEMPERATURE_EDGES: [f64; 3] = [200.0, 400.0, 500.0];

/// Interior edges between gravity buckets (Earth radii).
pub const GRAVITY_EDGES: [f64; 3] = [0.5, 2.0, 4.0];

/// Index of the bucket holding `value`, given ascending interior edges.
///
/// Buckets are right-inclusive: a value equal to an edge belongs to the bucket
/// below it. Anything at or below the first edge lands in bucket 0 and anything
/// above the last edge lands in the last bucket, so every value gets exactly
/// one bucket.
pub fn bucket(value: f64, edges: &[f64]) -> usize {
    edges.iter().take_while(|edge| value > **edge).count()
}

/// `labels` are ordered lowest bucket first.
fn pick<T: Copy>(value: f64, edges: &[f64], labels: &[T]) -> T {
    labels[bucket(value, edges).min(labels.len() - 1)]
}

// ---------------------------------------------------------------------------
// Per-column classifiers
// ---------------------------------------------------------------------------

pub fn star_size(star_radius: f64) -> StarSize {
    pick(star_radius, &STAR_SIZE_EDGES, StarSize::ALL)
}

pub fn temperature_class(planet_temperature: f64) -> TemperatureClass {
    pick(planet_temperature, &TEMPERATURE_EDGES, TemperatureClass::ALL)
}

pub fn gravity_class(planet_radius: f64) -> GravityClass {
    pick(planet_radius, &GRAVITY_EDGES, GravityClass::ALL)
}

/// Combine temperature and gravity into a habitability status.
///
/// First match wins:
/// 1. both optimal → suitable
/// 2. optimal temperature, low or high gravity → marginally admissible
/// 3. optimal gravity, low or high temperature → marginally admissible
/// 4. anything else → extreme
pub fn status(temperature: TemperatureClass, gravity: GravityClass) -> Status {
    use GravityClass as G;
    use TemperatureClass as T;

    match (temperature, gravity) {
        (T::Optimal, G::Optimal) => Status::Suitable,
        (T::Optimal, G::Low | G::High) => Status::MarginallyAdmissible,
        (T::Low | T::High, G::Optimal) => Status::MarginallyAdmissible,
        _ => Status::Extreme,
    }
}

/// Semi-major axis over star radius. The loader guarantees a positive radius.
pub fn relative_distance(semi_major_axis: f64, star_radius: f64) -> f64 {
    semi_major_axis / star_radius
}

pub fn derive(record: &PlanetRecord) -> DerivedColumns {
    let temperature_class = temperature_class(record.planet_temperature);
    let gravity_class = gravity_class(record.planet_radius);
    DerivedColumns {
        star_size: star_size(record.star_radius),
        temperature_class,
        gravity_class,
        status: status(temperature_class, gravity_class),
        relative_distance: relative_distance(record.semi_major_axis, record.star_radius),
    }
}

/// Attach derived columns to every record, preserving input order.
pub fn categorize(records: Vec<PlanetRecord>) -> Vec<CategorizedPlanet> {
    records
        .into_iter()
        .map(|record| {
            let derived = derive(&record);
            CategorizedPlanet { record, derived }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    #[test]
    fn star_sizes_for_three_rows() {
        let sizes: Vec<StarSize> = [0.5, 1.0, 1.5].iter().map(|r| star_size(*r)).collect();
        assert_eq!(
            sizes,
            vec![StarSize::SmallerThanSun, StarSize::SunLike, StarSize::LargerThanSun]
        );
    }

    #[test]
    fn edges_belong_to_lower_bucket() {
        assert_eq!(star_size(0.8), StarSize::SmallerThanSun);
        assert_eq!(star_size(0.800_001), StarSize::SunLike);
        assert_eq!(star_size(1.2), StarSize::SunLike);
        assert_eq!(temperature_class(200.0), TemperatureClass::Low);
        assert_eq!(temperature_class(400.0), TemperatureClass::Optimal);
        assert_eq!(temperature_class(500.0), TemperatureClass::High);
        assert_eq!(gravity_class(0.5), GravityClass::Low);
        assert_eq!(gravity_class(2.0), GravityClass::Optimal);
        assert_eq!(gravity_class(4.0), GravityClass::High);
    }

    #[test]
    fn binning_is_total_at_the_extremes() {
        assert_eq!(star_size(0.0), StarSize::SmallerThanSun);
        assert_eq!(star_size(1.0e6), StarSize::LargerThanSun);
        assert_eq!(temperature_class(0.0), TemperatureClass::Low);
        assert_eq!(temperature_class(12_000.0), TemperatureClass::Extreme);
        assert_eq!(gravity_class(250.0), GravityClass::Extreme);
        assert_eq!(bucket(f64::MAX, &GRAVITY_EDGES), 3);
    }

    #[test]
    fn status_table_covers_all_sixteen_pairs() {
        use GravityClass as G;
        use Status::*;
        use TemperatureClass as T;

        let expected = [
            (T::Low, G::Low, Extreme),
            (T::Low, G::Optimal, MarginallyAdmissible),
            (T::Low, G::High, Extreme),
            (T::Low, G::Extreme, Extreme),
            (T::Optimal, G::Low, MarginallyAdmissible),
            (T::Optimal, G::Optimal, Suitable),
            (T::Optimal, G::High, MarginallyAdmissible),
            (T::Optimal, G::Extreme, Extreme),
            (T::High, G::Low, Extreme),
            (T::High, G::Optimal, MarginallyAdmissible),
            (T::High, G::High, Extreme),
            (T::High, G::Extreme, Extreme),
            (T::Extreme, G::Low, Extreme),
            (T::Extreme, G::Optimal, Extreme),
            (T::Extreme, G::High, Extreme),
            (T::Extreme, G::Extreme, Extreme),
        ];
        assert_eq!(expected.len(), 16);
        for (t, g, want) in expected {
            assert_eq!(status(t, g), want, "temperature {t}, gravity {g}");
        }
    }

    #[test]
    fn optimal_temperature_and_radius_is_suitable() {
        let derived = derive(&record(1.0, 1.0, 300.0));
        assert_eq!(derived.temperature_class, TemperatureClass::Optimal);
        assert_eq!(derived.gravity_class, GravityClass::Optimal);
        assert_eq!(derived.status, Status::Suitable);
    }

    #[test]
    fn relative_distance_is_exact_ratio() {
        let mut rec = record(0.25, 1.0, 300.0);
        rec.semi_major_axis = 0.75;
        let planets = categorize(vec![rec.clone(), record(2.0, 1.0, 300.0)]);
        assert_eq!(planets[0].derived.relative_distance, 0.75 / 0.25);
        assert_eq!(planets[1].derived.relative_distance, 0.5 / 2.0);
        assert_eq!(planets[0].record, rec);
    }
}

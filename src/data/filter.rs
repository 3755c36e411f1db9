use std::collections::BTreeSet;

use super::model::{Catalog, CategorizedPlanet, Category, StarSize};

// ---------------------------------------------------------------------------
// Selection: star-size classes plus a planet-radius interval
// ---------------------------------------------------------------------------

/// What the user asked to see.
///
/// The radius bounds are exclusive: a planet passes only if
/// `radius_min < radius < radius_max`. An empty star-size set selects nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub star_sizes: BTreeSet<StarSize>,
    pub radius_min: f64,
    pub radius_max: f64,
}

impl Selection {
    /// Every star size and the catalogue's full observed radius range.
    pub fn everything(catalog: &Catalog) -> Self {
        let (radius_min, radius_max) = catalog.radius_bounds;
        Selection {
            star_sizes: StarSize::ALL.iter().copied().collect(),
            radius_min,
            radius_max,
        }
    }

    pub fn matches(&self, planet: &CategorizedPlanet) -> bool {
        let r = planet.record.planet_radius;
        self.star_sizes.contains(&planet.derived.star_size)
            && r > self.radius_min
            && r < self.radius_max
    }
}

/// Return the planets passing `selection`, in source order.
///
/// Pure: the input slice is never modified, so filtering an already filtered
/// subset with the same selection yields the same subset.
pub fn apply(planets: &[CategorizedPlanet], selection: &Selection) -> Vec<CategorizedPlanet> {
    planets
        .iter()
        .filter(|p| selection.matches(p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{catalog, record};

    fn radii(planets: &[CategorizedPlanet]) -> Vec<f64> {
        planets.iter().map(|p| p.record.planet_radius).collect()
    }

    #[test]
    fn full_selection_drops_only_boundary_radii() {
        let cat = catalog();
        let sel = Selection::everything(&cat);
        let out = apply(&cat.planets, &sel);
        // 0.3 and 10.0 are the observed min and max; the bounds are exclusive.
        assert_eq!(radii(&out), vec![1.0, 3.0, 1.5]);
    }

    #[test]
    fn widened_range_returns_full_set() {
        let cat = catalog();
        let sel = Selection {
            radius_min: cat.radius_bounds.0 - 0.01,
            radius_max: cat.radius_bounds.1 + 0.01,
            ..Selection::everything(&cat)
        };
        assert_eq!(apply(&cat.planets, &sel), cat.planets);
    }

    #[test]
    fn filtering_is_idempotent() {
        let cat = catalog();
        let sel = Selection {
            star_sizes: [StarSize::SunLike].into_iter().collect(),
            radius_min: 0.0,
            radius_max: 5.0,
        };
        let once = apply(&cat.planets, &sel);
        let twice = apply(&once, &sel);
        assert_eq!(once, twice);
        assert_eq!(radii(&once), vec![3.0, 0.3, 1.5]);
    }

    #[test]
    fn empty_star_selection_selects_nothing() {
        let cat = catalog();
        let sel = Selection {
            star_sizes: BTreeSet::new(),
            ..Selection::everything(&cat)
        };
        assert!(apply(&cat.planets, &sel).is_empty());
    }

    #[test]
    fn source_order_is_preserved() {
        let planets = crate::data::categorize::categorize(vec![
            record(1.0, 2.5, 300.0),
            record(1.0, 1.5, 300.0),
            record(1.0, 2.0, 300.0),
        ]);
        let sel = Selection {
            star_sizes: [StarSize::SunLike].into_iter().collect(),
            radius_min: 1.0,
            radius_max: 3.0,
        };
        assert_eq!(radii(&apply(&planets, &sel)), vec![2.5, 1.5, 2.0]);
    }
}

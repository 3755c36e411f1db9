use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category – a closed set of labels with a fixed display order
// ---------------------------------------------------------------------------

/// A categorical column whose values are known up front.
///
/// `ALL` fixes the order used for legends, palettes and selector widgets, so
/// the same category always lands in the same slot no matter which values a
/// filtered subset happens to contain.
pub trait Category: Copy + Eq + Ord + fmt::Display + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Position of this value inside `ALL`.
    fn ordinal(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

macro_rules! category_display {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

/// Host star size relative to the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StarSize {
    #[serde(rename = "Smaller than sun")]
    SmallerThanSun,
    #[serde(rename = "Sun-like")]
    SunLike,
    #[serde(rename = "Larger than sun")]
    LargerThanSun,
}

impl Category for StarSize {
    const ALL: &'static [Self] = &[Self::SmallerThanSun, Self::SunLike, Self::LargerThanSun];

    fn label(self) -> &'static str {
        match self {
            Self::SmallerThanSun => "Smaller than sun",
            Self::SunLike => "Sun-like",
            Self::LargerThanSun => "Larger than sun",
        }
    }
}

/// Equilibrium temperature band of a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TemperatureClass {
    Low,
    Optimal,
    High,
    Extreme,
}

impl Category for TemperatureClass {
    const ALL: &'static [Self] = &[Self::Low, Self::Optimal, Self::High, Self::Extreme];

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Optimal => "Optimal",
            Self::High => "High",
            Self::Extreme => "Extreme",
        }
    }
}

/// Surface gravity band, approximated from planet radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GravityClass {
    Low,
    Optimal,
    High,
    Extreme,
}

impl Category for GravityClass {
    const ALL: &'static [Self] = &[Self::Low, Self::Optimal, Self::High, Self::Extreme];

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Optimal => "Optimal",
            Self::High => "High",
            Self::Extreme => "Extreme",
        }
    }
}

/// Combined habitability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Marginally admissible")]
    MarginallyAdmissible,
    Extreme,
    Suitable,
}

impl Category for Status {
    const ALL: &'static [Self] = &[Self::MarginallyAdmissible, Self::Extreme, Self::Suitable];

    fn label(self) -> &'static str {
        match self {
            Self::MarginallyAdmissible => "Marginally admissible",
            Self::Extreme => "Extreme",
            Self::Suitable => "Suitable",
        }
    }
}

category_display!(StarSize);
category_display!(TemperatureClass);
category_display!(GravityClass);
category_display!(Status);

// ---------------------------------------------------------------------------
// PlanetRecord – one validated row of the Kepler catalogue
// ---------------------------------------------------------------------------

/// A validated planet candidate. Required fields are plain `f64`; everything
/// the charts and filters do not depend on stays optional.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    /// Kepler object of interest number, as published.
    pub koi: Option<String>,
    /// Semi-major axis (AU).
    pub semi_major_axis: f64,
    /// Planet radius (Earth radii).
    pub planet_radius: f64,
    /// Star radius (solar radii).
    pub star_radius: f64,
    /// Host star effective temperature (K).
    pub star_temperature: Option<f64>,
    pub kepler_magnitude: Option<f64>,
    /// Planet equilibrium temperature (K).
    pub planet_temperature: f64,
    pub transit_epoch: Option<f64>,
    pub transit_epoch_uncertainty: Option<f64>,
    /// Orbital period (days).
    pub period: f64,
    pub period_uncertainty: Option<f64>,
    pub declination: Option<f64>,
    pub right_ascension: Option<f64>,
    /// Derived stellar mass (solar masses).
    pub star_mass: Option<f64>,
}

/// Columns added by the categorizer. Computed once at load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedColumns {
    pub star_size: StarSize,
    pub temperature_class: TemperatureClass,
    pub gravity_class: GravityClass,
    pub status: Status,
    pub relative_distance: f64,
}

/// A record together with its derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedPlanet {
    pub record: PlanetRecord,
    pub derived: DerivedColumns,
}

// ---------------------------------------------------------------------------
// Catalog – the process-wide, read-only table
// ---------------------------------------------------------------------------

/// The loaded and categorized catalogue. Built once at startup and shared
/// behind an `Arc`; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub planets: Vec<CategorizedPlanet>,
    /// Observed (min, max) planet radius; bounds the radius selector.
    pub radius_bounds: (f64, f64),
    /// Rows dropped by load-time validation.
    pub excluded: usize,
}

impl Catalog {
    /// Categorize validated records and compute the selector bounds.
    pub fn from_records(records: Vec<PlanetRecord>, excluded: usize) -> Self {
        let radius_bounds = records
            .iter()
            .map(|r| r.planet_radius)
            .fold(None, |acc: Option<(f64, f64)>, r| match acc {
                None => Some((r, r)),
                Some((lo, hi)) => Some((lo.min(r), hi.max(r))),
            })
            .unwrap_or((0.0, 0.0));

        Catalog {
            planets: super::categorize::categorize(records),
            radius_bounds,
            excluded,
        }
    }

    /// Number of planets.
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Planet count per status, in `Status::ALL` order.
    pub fn status_counts(&self) -> Vec<(Status, usize)> {
        Status::ALL
            .iter()
            .map(|s| {
                let n = self.planets.iter().filter(|p| p.derived.status == *s).count();
                (*s, n)
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn radius_bounds_span_observed_values() {
        let cat = catalog();
        assert_eq!(cat.radius_bounds, (0.3, 10.0));
        assert_eq!(cat.len(), 5);
    }

    #[test]
    fn empty_catalog_has_zero_bounds() {
        let cat = Catalog::from_records(Vec::new(), 3);
        assert_eq!(cat.len(), 0);
        assert_eq!(cat.radius_bounds, (0.0, 0.0));
        assert_eq!(cat.excluded, 3);
    }

    #[test]
    fn status_counts_cover_every_status_in_order() {
        let counts = catalog().status_counts();
        let order: Vec<Status> = counts.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, Status::ALL.to_vec());
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 5);
    }

    #[test]
    fn labels_display_and_ordinals() {
        assert_eq!(StarSize::SunLike.to_string(), "Sun-like");
        assert_eq!(Status::Suitable.ordinal(), 2);
        assert_eq!(TemperatureClass::Extreme.ordinal(), 3);
    }
}

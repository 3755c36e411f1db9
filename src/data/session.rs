use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{
    CategorizedPlanet, DerivedColumns, GravityClass, PlanetRecord, StarSize, Status,
    TemperatureClass,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("encoding filtered rows")]
    Encode(#[source] csv::Error),
    #[error("decoding filtered rows")]
    Decode(#[source] csv::Error),
    #[error("session store has not been written yet")]
    Empty,
}

// ---------------------------------------------------------------------------
// Row layout of the session store
// ---------------------------------------------------------------------------

/// One flattened CSV row: raw columns first, then the derived ones.
#[derive(Debug, Serialize, Deserialize)]
struct StoreRow {
    koi: Option<String>,
    a: f64,
    rplanet: f64,
    rstar: f64,
    tstar: Option<f64>,
    kmag: Option<f64>,
    tplanet: f64,
    t0: Option<f64>,
    ut0: Option<f64>,
    per: f64,
    uper: Option<f64>,
    dec: Option<f64>,
    ra: Option<f64>,
    mstar: Option<f64>,
    star_size: StarSize,
    temperature_class: TemperatureClass,
    gravity_class: GravityClass,
    status: Status,
    relative_distance: f64,
}

impl From<&CategorizedPlanet> for StoreRow {
    fn from(p: &CategorizedPlanet) -> Self {
        let r = &p.record;
        let d = &p.derived;
        StoreRow {
            koi: r.koi.clone(),
            a: r.semi_major_axis,
            rplanet: r.planet_radius,
            rstar: r.star_radius,
            tstar: r.star_temperature,
            kmag: r.kepler_magnitude,
            tplanet: r.planet_temperature,
            t0: r.transit_epoch,
            ut0: r.transit_epoch_uncertainty,
            per: r.period,
            uper: r.period_uncertainty,
            dec: r.declination,
            ra: r.right_ascension,
            mstar: r.star_mass,
            star_size: d.star_size,
            temperature_class: d.temperature_class,
            gravity_class: d.gravity_class,
            status: d.status,
            relative_distance: d.relative_distance,
        }
    }
}

impl From<StoreRow> for CategorizedPlanet {
    fn from(row: StoreRow) -> Self {
        CategorizedPlanet {
            record: PlanetRecord {
                koi: row.koi,
                semi_major_axis: row.a,
                planet_radius: row.rplanet,
                star_radius: row.rstar,
                star_temperature: row.tstar,
                kepler_magnitude: row.kmag,
                planet_temperature: row.tplanet,
                transit_epoch: row.t0,
                transit_epoch_uncertainty: row.ut0,
                period: row.per,
                period_uncertainty: row.uper,
                declination: row.dec,
                right_ascension: row.ra,
                star_mass: row.mstar,
            },
            derived: DerivedColumns {
                star_size: row.star_size,
                temperature_class: row.temperature_class,
                gravity_class: row.gravity_class,
                status: row.status,
                relative_distance: row.relative_distance,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Serialize a filtered subset to CSV text (header row always present).
pub fn encode(planets: &[CategorizedPlanet]) -> Result<String, SessionError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for p in planets {
        writer.serialize(StoreRow::from(p)).map_err(SessionError::Encode)?;
    }
    if planets.is_empty() {
        // serde only emits the header alongside the first record
        writer
            .write_record(STORE_COLUMNS)
            .map_err(SessionError::Encode)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SessionError::Encode(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse CSV text produced by [`encode`].
pub fn decode(text: &str) -> Result<Vec<CategorizedPlanet>, SessionError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    reader
        .deserialize::<StoreRow>()
        .map(|row| row.map(CategorizedPlanet::from).map_err(SessionError::Decode))
        .collect()
}

const STORE_COLUMNS: &[&str] = &[
    "koi",
    "a",
    "rplanet",
    "rstar",
    "tstar",
    "kmag",
    "tplanet",
    "t0",
    "ut0",
    "per",
    "uper",
    "dec",
    "ra",
    "mstar",
    "star_size",
    "temperature_class",
    "gravity_class",
    "status",
    "relative_distance",
];

// ---------------------------------------------------------------------------
// SessionStore – per-window holder of the serialized subset
// ---------------------------------------------------------------------------

/// Holds the last filtered subset as CSV text. Written by the filter callback,
/// read by the render callback.
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    data: Option<String>,
}

impl SessionStore {
    pub fn write(&mut self, planets: &[CategorizedPlanet]) -> Result<(), SessionError> {
        self.data = Some(encode(planets)?);
        Ok(())
    }

    pub fn read(&self) -> Result<Vec<CategorizedPlanet>, SessionError> {
        match &self.data {
            Some(text) => decode(text),
            None => Err(SessionError::Empty),
        }
    }

    /// Raw stored text, if any.
    pub fn raw(&self) -> Option<&str> {
        self.data.as_deref()
    }

    #[cfg(test)]
    pub fn put_raw(&mut self, text: &str) {
        self.data = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::catalog;

    #[test]
    fn store_returns_what_was_written() {
        let cat = catalog();
        let mut store = SessionStore::default();
        store.write(&cat.planets).unwrap();
        assert_eq!(store.read().unwrap(), cat.planets);
        assert!(store.raw().unwrap().starts_with("koi,a,rplanet"));
    }

    #[test]
    fn empty_subset_keeps_header_only() {
        let text = encode(&[]).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert_eq!(text.trim_end(), STORE_COLUMNS.join(","));
        assert!(decode(&text).unwrap().is_empty());
    }

    #[test]
    fn labels_are_written_as_text() {
        let cat = catalog();
        let text = encode(&cat.planets[..1]).unwrap();
        assert!(text.contains("Smaller than sun"));
        assert!(text.contains("Suitable"));
    }

    #[test]
    fn unread_store_is_an_error() {
        assert!(matches!(SessionStore::default().read(), Err(SessionError::Empty)));
    }

    #[test]
    fn corrupt_store_is_a_decode_error() {
        let mut store = SessionStore::default();
        store.put_raw("koi,a\n1.01,not-a-number\n");
        assert!(matches!(store.read(), Err(SessionError::Decode(_))));
    }
}

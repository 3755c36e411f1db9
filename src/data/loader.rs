use std::time::Duration;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Catalog, PlanetRecord};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("{url} answered with HTTP {code}")]
    Status { code: u16, url: String },
    #[error("reading response body")]
    Body(#[from] std::io::Error),
    #[error("parsing catalogue JSON")]
    Json(#[from] serde_json::Error),
    #[error("catalogue contains no usable rows ({excluded} excluded)")]
    Empty { excluded: usize },
}

/// Why a single row was rejected at load time.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
    #[error("non-positive orbital period {0}")]
    NonPositivePeriod(f64),
    #[error("non-positive star radius {0}")]
    NonPositiveStarRadius(f64),
    #[error("negative {0}: {1}")]
    Negative(&'static str, f64),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch the catalogue from the configured API and categorize it.
///
/// Blocking; called once before the window opens.
pub fn fetch_catalog(config: &DashboardConfig) -> Result<Catalog, CatalogError> {
    let url = config.api_url.as_str();
    log::info!("Fetching planet catalogue from {url}");

    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build();

    let response = match agent.get(url).call() {
        Ok(resp) => resp,
        Err(ureq::Error::Status(code, _)) => {
            return Err(CatalogError::Status {
                code,
                url: url.to_string(),
            })
        }
        Err(e) => {
            return Err(CatalogError::Http {
                url: url.to_string(),
                source: Box::new(e),
            })
        }
    };

    // ureq only errors on 4xx/5xx; anything else but 200 is still a failure.
    if response.status() != 200 {
        return Err(CatalogError::Status {
            code: response.status(),
            url: url.to_string(),
        });
    }

    let text = response.into_string()?;
    let catalog = parse_catalog(&text)?;
    log::info!(
        "Loaded {} planets ({} rows excluded)",
        catalog.len(),
        catalog.excluded
    );
    Ok(catalog)
}

/// Parse the API document: a top-level JSON array of row objects.
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogError> {
    let rows: Vec<RawPlanet> = serde_json::from_str(text)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut excluded = 0;

    for (i, raw) in rows.into_iter().enumerate() {
        match PlanetRecord::try_from(raw) {
            Ok(rec) => records.push(rec),
            Err(e) => {
                log::debug!("Row {i} excluded: {e}");
                excluded += 1;
            }
        }
    }

    if excluded > 0 {
        log::info!("Excluded {excluded} rows that failed validation");
    }
    if records.is_empty() {
        return Err(CatalogError::Empty { excluded });
    }

    Ok(Catalog::from_records(records, excluded))
}

// ---------------------------------------------------------------------------
// Wire schema
// ---------------------------------------------------------------------------

/// One row as the Kepler endpoint sends it. Every field may be absent or null.
#[derive(Debug, Default, Deserialize)]
struct RawPlanet {
    #[serde(rename = "KOI")]
    koi: Option<JsonValue>,
    #[serde(rename = "A")]
    a: Option<f64>,
    #[serde(rename = "RPLANET")]
    rplanet: Option<f64>,
    #[serde(rename = "RSTAR")]
    rstar: Option<f64>,
    #[serde(rename = "TSTAR")]
    tstar: Option<f64>,
    #[serde(rename = "KMAG")]
    kmag: Option<f64>,
    #[serde(rename = "TPLANET")]
    tplanet: Option<f64>,
    #[serde(rename = "T0")]
    t0: Option<f64>,
    #[serde(rename = "UT0")]
    ut0: Option<f64>,
    #[serde(rename = "PER")]
    per: Option<f64>,
    #[serde(rename = "UPER")]
    uper: Option<f64>,
    #[serde(rename = "DEC")]
    dec: Option<f64>,
    #[serde(rename = "RA")]
    ra: Option<f64>,
    #[serde(rename = "MSTAR")]
    mstar: Option<f64>,
}

fn required(value: Option<f64>, field: &'static str) -> Result<f64, RecordError> {
    let v = value.ok_or(RecordError::Missing(field))?;
    if !v.is_finite() {
        return Err(RecordError::NonFinite(field));
    }
    Ok(v)
}

fn non_negative(value: f64, field: &'static str) -> Result<f64, RecordError> {
    if value < 0.0 {
        return Err(RecordError::Negative(field, value));
    }
    Ok(value)
}

fn koi_label(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl TryFrom<RawPlanet> for PlanetRecord {
    type Error = RecordError;

    fn try_from(raw: RawPlanet) -> Result<Self, Self::Error> {
        let period = required(raw.per, "PER")?;
        if period <= 0.0 {
            return Err(RecordError::NonPositivePeriod(period));
        }
        let star_radius = required(raw.rstar, "RSTAR")?;
        if star_radius <= 0.0 {
            return Err(RecordError::NonPositiveStarRadius(star_radius));
        }

        Ok(PlanetRecord {
            koi: raw.koi.and_then(koi_label),
            semi_major_axis: non_negative(required(raw.a, "A")?, "A")?,
            planet_radius: non_negative(required(raw.rplanet, "RPLANET")?, "RPLANET")?,
            star_radius,
            star_temperature: raw.tstar,
            kepler_magnitude: raw.kmag,
            planet_temperature: non_negative(required(raw.tplanet, "TPLANET")?, "TPLANET")?,
            transit_epoch: raw.t0,
            transit_epoch_uncertainty: raw.ut0,
            period,
            period_uncertainty: raw.uper,
            declination: raw.dec,
            right_ascension: raw.ra,
            star_mass: raw.mstar,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::data::model::{StarSize, Status};

    const ONE_ROW: &str =
        r#"[{"KOI": 1.01, "A": 0.5, "RPLANET": 1.0, "RSTAR": 1.0, "TPLANET": 300, "PER": 2.5}]"#;

    /// Answer a single request on a local port with `status_line` and `body`.
    fn serve_once(status_line: &'static str, body: &'static str) -> DashboardConfig {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            write!(
                stream,
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        DashboardConfig {
            api_url: format!("http://{addr}/api/kepler"),
            http_timeout_secs: 5,
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn fetch_accepts_ok_response() {
        let config = serve_once("200 OK", ONE_ROW);
        let cat = fetch_catalog(&config).unwrap();
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn fetch_rejects_client_error() {
        let config = serve_once("404 Not Found", "[]");
        let err = fetch_catalog(&config).unwrap_err();
        assert!(matches!(err, CatalogError::Status { code: 404, .. }));
    }

    #[test]
    fn fetch_rejects_non_200_success_codes() {
        let config = serve_once("203 Non-Authoritative Information", ONE_ROW);
        let err = fetch_catalog(&config).unwrap_err();
        assert!(matches!(err, CatalogError::Status { code: 203, .. }));
    }

    const SAMPLE: &str = r#"[
        {"KOI": 1.01, "A": 0.036, "RPLANET": 13.04, "RSTAR": 1.06, "TSTAR": 5850,
         "KMAG": 11.34, "TPLANET": 1339, "T0": 55.76, "UT0": 0.0000199, "PER": 2.47,
         "UPER": 0.0000001, "DEC": 36.57, "RA": 286.8, "MSTAR": 0.97, "ROW": 1},
        {"KOI": "K00701.03", "A": 0.6, "RPLANET": 1.5, "RSTAR": 0.7, "TSTAR": 4900,
         "KMAG": 13.7, "TPLANET": 262, "T0": 1.0, "UT0": null, "PER": 122.4,
         "UPER": null, "DEC": 45.1, "RA": 290.1, "MSTAR": null},
        {"KOI": 2.01, "A": 0.04, "RPLANET": 16.4, "RSTAR": 2.0, "TPLANET": 2025, "PER": -1.0},
        {"KOI": 3.01, "A": 0.05, "RPLANET": 4.8, "RSTAR": 0.0, "TPLANET": 800, "PER": 4.9},
        {"KOI": 4.01, "A": 0.05, "RPLANET": null, "RSTAR": 0.9, "TPLANET": 800, "PER": 4.9}
    ]"#;

    #[test]
    fn parses_valid_rows_and_excludes_invalid_ones() {
        let cat = parse_catalog(SAMPLE).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.excluded, 3);

        let first = &cat.planets[0];
        assert_eq!(first.record.koi.as_deref(), Some("1.01"));
        assert_eq!(first.derived.star_size, StarSize::SunLike);
        assert_eq!(first.derived.status, Status::Extreme);

        let second = &cat.planets[1];
        assert_eq!(second.record.koi.as_deref(), Some("K00701.03"));
        assert_eq!(second.record.star_mass, None);
        assert_eq!(second.derived.star_size, StarSize::SmallerThanSun);
        assert_eq!(second.derived.status, Status::Suitable);
        assert_eq!(cat.radius_bounds, (1.5, 13.04));
    }

    #[test]
    fn period_and_star_radius_rules() {
        let raw = RawPlanet {
            a: Some(0.1),
            rplanet: Some(1.0),
            rstar: Some(1.0),
            tplanet: Some(300.0),
            per: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            PlanetRecord::try_from(raw).unwrap_err(),
            RecordError::NonPositivePeriod(0.0)
        );

        let raw = RawPlanet {
            a: Some(0.1),
            rplanet: Some(1.0),
            rstar: Some(0.0),
            tplanet: Some(300.0),
            per: Some(3.0),
            ..Default::default()
        };
        assert_eq!(
            PlanetRecord::try_from(raw).unwrap_err(),
            RecordError::NonPositiveStarRadius(0.0)
        );
    }

    #[test]
    fn negative_measurements_are_rejected() {
        let raw = RawPlanet {
            a: Some(0.1),
            rplanet: Some(1.0),
            rstar: Some(1.0),
            tplanet: Some(-5.0),
            per: Some(3.0),
            ..Default::default()
        };
        assert_eq!(
            PlanetRecord::try_from(raw).unwrap_err(),
            RecordError::Negative("TPLANET", -5.0)
        );
    }

    #[test]
    fn all_rows_invalid_is_an_error() {
        let err = parse_catalog(r#"[{"PER": -2.0}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Empty { excluded: 1 }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_catalog("{\"not\": \"an array\"}"),
            Err(CatalogError::Json(_))
        ));
    }
}

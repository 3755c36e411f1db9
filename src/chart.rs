//! Chart renderer: turns a filtered subset into plot-ready descriptions.
//!
//! Nothing here touches egui's drawing API; `ui::plot` and `ui::table` paint
//! whatever these structs describe.

use eframe::egui::Color32;

use crate::color::Palette;
use crate::config::DashboardConfig;
use crate::data::model::{CategorizedPlanet, Category, StarSize, Status};

/// Smallest marker radius, so tiny planets stay visible.
const MIN_MARKER_RADIUS: f32 = 1.5;

/// Marker radius for unsized scatters.
const DEFAULT_MARKER_RADIUS: f32 = 3.0;

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------

/// A point in a scatter series; `radius` is the marker radius in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f32,
}

/// All points of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub color: Color32,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub id: &'static str,
    pub caption: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
}

/// Counts of one category over the shared bin edges.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub name: &'static str,
    pub color: Color32,
    pub counts: Vec<usize>,
}

/// Vertical marker drawn on top of a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub x: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    pub id: &'static str,
    pub caption: &'static str,
    pub x_label: &'static str,
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub series: Vec<HistogramSeries>,
    pub reference: ReferenceLine,
}

impl HistogramChart {
    /// Centre of bin `i`.
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }

    pub fn bin_count(&self) -> usize {
        self.series.first().map_or(0, |s| s.counts.len())
    }
}

/// The raw columns of a filtered subset, preformatted for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Everything the Charts and Data tabs show for one filter application.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub dist_temp: ScatterChart,
    pub celestial: ScatterChart,
    pub relative_dist: HistogramChart,
    pub mass_temp: ScatterChart,
    pub table: TableView,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Build the four charts and the raw table for `planets`.
pub fn render(planets: &[CategorizedPlanet], config: &DashboardConfig) -> ChartSet {
    let sizer = MarkerSizer::new(planets, config.max_marker_radius);

    let dist_temp = ScatterChart {
        id: "dist_temp_chart",
        caption: "Planet temperature vs distance from the star",
        x_label: "Planet temperature (K)",
        y_label: "Semi-major axis (AU)",
        series: grouped::<StarSize>(
            planets,
            |p| p.derived.star_size,
            |p| {
                Some(ScatterPoint {
                    x: p.record.planet_temperature,
                    y: p.record.semi_major_axis,
                    radius: DEFAULT_MARKER_RADIUS,
                })
            },
        ),
    };

    let celestial = ScatterChart {
        id: "celestial_chart",
        caption: "Position on the celestial sphere: right ascension vs declination",
        x_label: "Right ascension (deg)",
        y_label: "Declination (deg)",
        series: grouped::<Status>(
            planets,
            |p| p.derived.status,
            |p| {
                Some(ScatterPoint {
                    x: p.record.right_ascension?,
                    y: p.record.declination?,
                    radius: sizer.radius(p.record.planet_radius),
                })
            },
        ),
    };

    let mass_temp = ScatterChart {
        id: "mstar_tstar_chart",
        caption: "Star mass vs star temperature",
        x_label: "Star mass (solar masses)",
        y_label: "Star temperature (K)",
        series: grouped::<Status>(
            planets,
            |p| p.derived.status,
            |p| {
                Some(ScatterPoint {
                    x: p.record.star_mass?,
                    y: p.record.star_temperature?,
                    radius: sizer.radius(p.record.planet_radius),
                })
            },
        ),
    };

    ChartSet {
        dist_temp,
        celestial,
        relative_dist: relative_distance_histogram(planets, config.histogram_bins),
        mass_temp,
        table: table_view(planets),
    }
}

/// One series per category value, in `T::ALL` order, empty ones included.
/// Rows whose point function returns `None` (missing optional column) are skipped.
fn grouped<T: Palette>(
    planets: &[CategorizedPlanet],
    key: impl Fn(&CategorizedPlanet) -> T,
    point: impl Fn(&CategorizedPlanet) -> Option<ScatterPoint>,
) -> Vec<Series> {
    let mut series: Vec<Series> = T::ALL
        .iter()
        .map(|c| Series {
            name: c.label(),
            color: c.color(),
            points: Vec::new(),
        })
        .collect();

    for p in planets {
        if let Some(pt) = point(p) {
            series[key(p).ordinal()].points.push(pt);
        }
    }
    series
}

/// Area-proportional marker sizing relative to the largest planet shown.
struct MarkerSizer {
    max_radius: f64,
    max_marker: f32,
}

impl MarkerSizer {
    fn new(planets: &[CategorizedPlanet], max_marker: f32) -> Self {
        let max_radius = planets
            .iter()
            .map(|p| p.record.planet_radius)
            .fold(0.0, f64::max);
        MarkerSizer { max_radius, max_marker }
    }

    fn radius(&self, planet_radius: f64) -> f32 {
        if self.max_radius <= 0.0 {
            return MIN_MARKER_RADIUS;
        }
        let scaled = self.max_marker * (planet_radius / self.max_radius).sqrt() as f32;
        scaled.max(MIN_MARKER_RADIUS)
    }
}

/// Overlaid per-status histogram of relative distance.
///
/// All statuses share the same edges. Bins are `[lo, hi)` except the last,
/// which also takes the maximum.
pub fn relative_distance_histogram(planets: &[CategorizedPlanet], bins: usize) -> HistogramChart {
    let values: Vec<f64> = planets.iter().map(|p| p.derived.relative_distance).collect();
    let (lo, hi) = values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0));

    // A single distinct value gets one unit-wide bin centred on it.
    let (n_bins, start, bin_width) = if values.is_empty() {
        (0, 0.0, 1.0)
    } else if hi > lo {
        let n = bins.max(1);
        (n, lo, (hi - lo) / n as f64)
    } else {
        (1, lo - 0.5, 1.0)
    };

    let mut series: Vec<HistogramSeries> = Status::ALL
        .iter()
        .map(|s| HistogramSeries {
            name: s.label(),
            color: s.color(),
            counts: vec![0; n_bins],
        })
        .collect();

    for (p, v) in planets.iter().zip(&values) {
        let idx = (((v - start) / bin_width).floor() as usize).min(n_bins.saturating_sub(1));
        series[p.derived.status.ordinal()].counts[idx] += 1;
    }

    HistogramChart {
        id: "relative_dist_chart",
        caption: "Relative distance from the planet to its star, star radius included",
        x_label: "Semi-major axis / star radius",
        start,
        bin_width,
        series,
        reference: ReferenceLine { x: 1.0, label: "Earth" },
    }
}

// ---------------------------------------------------------------------------
// Raw table
// ---------------------------------------------------------------------------

/// Raw column names, as the Kepler endpoint spells them.
pub const RAW_COLUMNS: [&str; 14] = [
    "KOI", "A", "RPLANET", "RSTAR", "TSTAR", "KMAG", "TPLANET", "T0", "UT0", "PER", "UPER",
    "DEC", "RA", "MSTAR",
];

fn cell(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// The filtered subset with derived columns left out.
pub fn table_view(planets: &[CategorizedPlanet]) -> TableView {
    let rows = planets
        .iter()
        .map(|p| {
            let r = &p.record;
            vec![
                r.koi.clone().unwrap_or_default(),
                r.semi_major_axis.to_string(),
                r.planet_radius.to_string(),
                r.star_radius.to_string(),
                cell(r.star_temperature),
                cell(r.kepler_magnitude),
                r.planet_temperature.to_string(),
                cell(r.transit_epoch),
                cell(r.transit_epoch_uncertainty),
                r.period.to_string(),
                cell(r.period_uncertainty),
                cell(r.declination),
                cell(r.right_ascension),
                cell(r.star_mass),
            ]
        })
        .collect();

    TableView {
        columns: RAW_COLUMNS.to_vec(),
        rows,
    }
}

impl TableView {
    /// Rows of page `page` (zero-based).
    pub fn page(&self, page: usize, page_size: usize) -> &[Vec<String>] {
        let start = (page * page_size).min(self.rows.len());
        let end = (start + page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        self.rows.len().div_ceil(page_size.max(1)).max(1)
    }

    /// Write the table as CSV.
    pub fn write_csv<W: std::io::Write>(&self, out: W) -> csv::Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

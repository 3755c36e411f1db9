use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::{legend_entries, Palette};
use crate::data::model::{Category, StarSize};
use crate::state::{AppState, Tab};
use crate::ui::{plot, table};

const EXOPLANETS_ARTICLE: &str =
    "https://trends.rbc.ru/trends/futurology/607f135e9a79474d800799b7";
const DATA_SOURCE: &str = "http://www.asterank.com/kepler";

const ABOUT_TEXT: &str = "Hi everyone! This dashboard was put together by a student of the \
    Cooperative College. It sets out to show that there are planets similar to ours, where \
    life might exist, and much more besides.";

/// Raw field → description, shown on the About tab.
const FIELD_DESCRIPTIONS: [(&str, &str); 14] = [
    ("KOI", "Kepler object of interest number"),
    ("A", "Semi-major axis (AU)"),
    ("RPLANET", "Planet radius (Earth radii)"),
    ("RSTAR", "Star radius (solar radii)"),
    ("TSTAR", "Effective temperature of the host star as listed in the KIC (K)"),
    ("KMAG", "Kepler magnitude (kmag)"),
    ("TPLANET", "Equilibrium temperature of the planet, per Borucki et al. (K)"),
    ("T0", "Time of transit centre (BJD-2454900)"),
    ("UT0", "Uncertainty in the time of transit centre (+-jd)"),
    ("PER", "Period (days)"),
    ("UPER", "Uncertainty in the period (+-days)"),
    ("DEC", "Declination (@J200)"),
    ("RA", "Right ascension (@J200)"),
    ("MSTAR", "Derived stellar mass (msol)"),
];

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Logo, title, article link and the current result summary.
pub fn header(ui: &mut Ui, state: &AppState) {
    let logo = egui::include_image!("../../assets/logo.png");
    ui.horizontal(|ui: &mut Ui| {
        ui.add_space(24.0);
        ui.add(egui::Image::new(logo).max_width(64.0).max_height(64.0));
        ui.add_space(16.0);
        ui.vertical(|ui: &mut Ui| {
            ui.heading(RichText::new("Exoplanets, data visualisation").size(26.0));
            ui.hyperlink_to("Read about exoplanets", EXOPLANETS_ARTICLE);
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.add_space(24.0);
            if let Some(msg) = &state.status_message {
                let color = if msg.starts_with("Error") {
                    Color32::RED
                } else {
                    Color32::GRAY
                };
                ui.label(RichText::new(msg).color(color));
                ui.separator();
            }
            ui.label(format!(
                "{} of {} planets shown",
                state.shown_count(),
                state.catalog.len()
            ));
        });
    });
}

// ---------------------------------------------------------------------------
// Filter bar
// ---------------------------------------------------------------------------

/// Radius range, star-size selector and the Apply button.
///
/// Widget changes only update draft values; the charts follow on Apply.
pub fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_top(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.strong("Planet radius range (Earth radii)");
            let (min, max) = state.catalog.radius_bounds;
            let mut lo = state.controls.radius_min;
            let mut hi = state.controls.radius_max;
            let lo_changed = ui
                .add(egui::Slider::new(&mut lo, min..=max).text("from"))
                .changed();
            let hi_changed = ui
                .add(egui::Slider::new(&mut hi, min..=max).text("to"))
                .changed();
            if lo_changed || hi_changed {
                state.set_radius_range(lo, hi.max(lo));
            }
        });

        ui.add_space(40.0);

        ui.vertical(|ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Star size");
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });
            for (size, (label, color)) in StarSize::ALL.iter().zip(legend_entries::<StarSize>()) {
                let mut checked = state.controls.star_sizes.contains(size);
                let text = RichText::new(label).color(color);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_star_size(*size);
                }
            }
        });

        ui.add_space(40.0);

        if ui
            .add(egui::Button::new(RichText::new("Apply").strong()).min_size([96.0, 32.0].into()))
            .clicked()
        {
            state.submit();
        }
    });
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, Tab::Charts, "Charts");
        ui.selectable_value(&mut state.tab, Tab::Data, "Data");
        ui.selectable_value(&mut state.tab, Tab::About, "About");
    });
    ui.separator();
}

/// Body of the active tab.
pub fn tab_content(ui: &mut Ui, state: &mut AppState) {
    match state.tab {
        Tab::Charts => charts_tab(ui, state),
        Tab::Data => table::data_tab(ui, state),
        Tab::About => about_tab(ui, state),
    }
}

/// Two rows of two charts.
fn charts_tab(ui: &mut Ui, state: &AppState) {
    let Some(charts) = &state.charts else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No chart data. Press Apply to filter the catalogue.");
        });
        return;
    };

    let height = ((ui.available_height() - 120.0) / 2.0).max(220.0);
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols| {
                plot::scatter(&mut cols[0], &charts.dist_temp, height);
                plot::scatter(&mut cols[1], &charts.celestial, height);
            });
            ui.add_space(24.0);
            ui.columns(2, |cols| {
                plot::histogram(&mut cols[0], &charts.relative_dist, height);
                plot::scatter(&mut cols[1], &charts.mass_temp, height);
            });
        });
}

fn about_tab(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.add_space(12.0);
            ui.label(ABOUT_TEXT);
            ui.hyperlink_to("Data comes from the Kepler API via asterank.com", DATA_SOURCE);
            ui.add_space(12.0);

            let catalog = &state.catalog;
            ui.label(format!(
                "{} planets loaded, {} rows dropped by validation.",
                catalog.len(),
                catalog.excluded
            ));
            ui.horizontal(|ui: &mut Ui| {
                for (status, count) in catalog.status_counts() {
                    ui.label(RichText::new(format!("{status}: {count}")).color(status.color()));
                    ui.add_space(12.0);
                }
            });
            ui.add_space(24.0);

            egui::Grid::new("field_descriptions")
                .striped(true)
                .num_columns(2)
                .spacing([24.0, 6.0])
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Field");
                    ui.strong("Description");
                    ui.end_row();
                    for (field, description) in FIELD_DESCRIPTIONS {
                        ui.monospace(field);
                        ui.label(description);
                        ui.end_row();
                    }
                });
        });
}

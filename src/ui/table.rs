use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::TableView;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data tab
// ---------------------------------------------------------------------------

/// Paged view of the raw columns of the last filter result.
pub fn data_tab(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.heading("Source data");

    let Some(charts) = &state.charts else {
        ui.label("Nothing to show.");
        return;
    };
    let table = &charts.table;
    let page_size = state.config.page_size;
    let pages = table.page_count(page_size);
    state.page = state.page.min(pages - 1);

    let mut export_result = None;
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.page > 0, egui::Button::new("◀ Prev"))
            .clicked()
        {
            state.page -= 1;
        }
        ui.label(format!("Page {} / {pages}", state.page + 1));
        if ui
            .add_enabled(state.page + 1 < pages, egui::Button::new("Next ▶"))
            .clicked()
        {
            state.page += 1;
        }
        ui.separator();
        ui.label(format!("{} rows", table.rows.len()));
        ui.separator();
        if ui.button("Export CSV…").clicked() {
            export_result = save_dialog(table);
        }
    });

    match export_result {
        Some(Ok(path)) => state.status_message = Some(format!("Exported to {path}")),
        Some(Err(e)) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
        None => {}
    }

    ui.separator();
    let rows = table.page(state.page, page_size);
    ui.push_id("data_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), table.columns.len())
            .header(22.0, |mut header| {
                for name in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.vertical_centered(|ui: &mut Ui| {
                            ui.strong(*name);
                        });
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for value in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(value.as_str());
                        });
                    }
                });
            });
    });

    if rows.is_empty() {
        ui.label(RichText::new("No planets match the current filter.").color(Color32::GRAY));
    }
}

/// Ask for a destination and write `table` there. `None` if the user cancelled.
fn save_dialog(table: &TableView) -> Option<Result<String>> {
    let path = rfd::FileDialog::new()
        .set_title("Export filtered planets")
        .add_filter("CSV", &["csv"])
        .set_file_name("planets.csv")
        .save_file()?;

    Some(export_csv(table, &path).map(|()| {
        log::info!("Exported {} rows to {}", table.rows.len(), path.display());
        path.display().to_string()
    }))
}

/// Write the raw table to `path` as CSV.
pub fn export_csv(table: &TableView, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    table
        .write_csv(BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::table_view;
    use crate::data::model::fixtures::catalog;

    #[test]
    fn export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planets.csv");
        let table = table_view(&catalog().planets);
        export_csv(&table, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("KOI,A,RPLANET,RSTAR"));
    }

    #[test]
    fn export_to_missing_directory_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("planets.csv");
        let err = export_csv(&TableView::default(), &path).unwrap_err();
        assert!(format!("{err:#}").contains("creating"));
    }
}

use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::query::QueryResult;

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Render the query title and the top-10 result table.
pub fn results_table(ui: &mut Ui, result: &QueryResult) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&result.title);
    });
    ui.add_space(8.0);

    if result.rows.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label("No movies match the current selection.");
        });
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::remainder().at_least(120.0), result.columns.len())
        .header(24.0, |mut header| {
            for col in result.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|mut body| {
            for row in &result.rows {
                body.row(20.0, |mut table_row| {
                    for cell in row.cells() {
                        table_row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

use eframe::egui::{self, Ui};

use crate::data::loader::MIN_VOTES;
use crate::data::query::{Cohort, RankDirection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: brand, tagline, and table stats.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("IMDb Explorer");
        ui.separator();
        ui.label("Explore IMDb best and worst rated movies.");
        ui.separator();
        ui.label(format!(
            "{} movies with at least {MIN_VOTES} votes",
            state.table.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Controls strip – the three query dropdowns
// ---------------------------------------------------------------------------

/// Render the rank / decade / cohort dropdowns and re-run the query when a
/// selection changes.
pub fn controls(ui: &mut Ui, state: &mut AppState) {
    let before = (state.rank, state.decade, state.cohort);
    // Collected up front so the ComboBox closures can mutate the selection.
    let decade_options = state.decade_options();

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Use dropdowns to filter the data.");
        ui.separator();

        egui::ComboBox::from_id_salt("rank_dropdown")
            .selected_text(state.rank.label())
            .show_ui(ui, |ui: &mut Ui| {
                for rank in RankDirection::VALUES {
                    ui.selectable_value(&mut state.rank, rank, rank.label());
                }
            });

        egui::ComboBox::from_id_salt("decade_dropdown")
            .selected_text(state.decade.label())
            .show_ui(ui, |ui: &mut Ui| {
                for &decade in &decade_options {
                    let label = decade.label();
                    ui.selectable_value(&mut state.decade, decade, label);
                }
            });

        egui::ComboBox::from_id_salt("cohort_dropdown")
            .selected_text(state.cohort.label())
            .show_ui(ui, |ui: &mut Ui| {
                for cohort in Cohort::VALUES {
                    ui.selectable_value(&mut state.cohort, cohort, cohort.label());
                }
            });
    });

    if before != (state.rank, state.decade, state.cohort) {
        state.refresh();
    }
}

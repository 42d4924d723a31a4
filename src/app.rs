use eframe::egui;

use crate::data::model::MovieTable;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ImdbExplorerApp {
    pub state: AppState,
}

impl ImdbExplorerApp {
    pub fn new(table: MovieTable) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for ImdbExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: brand + table stats ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Controls strip: the three query dropdowns ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            panels::controls(ui, &mut self.state);
        });

        // ---- Central panel: query title + result table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::results_table(ui, &self.state.result);
        });
    }
}

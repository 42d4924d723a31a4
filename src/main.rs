mod app;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::ImdbExplorerApp;
use eframe::egui;

/// Input files are read from here, relative to the working directory.
const DATA_DIR: &str = "data";

fn main() -> eframe::Result {
    env_logger::init();

    // The table is loaded before the window opens; a load failure aborts
    // startup rather than serving a partial table.
    let table = match data::loader::load(Path::new(DATA_DIR)) {
        Ok(table) => table,
        Err(e) => {
            log::error!("failed to load movie data: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "IMDb Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(ImdbExplorerApp::new(table)))),
    )
}

mod app;
mod chart;
mod cli;
mod color;
mod dashboard;
mod data;
mod state;
mod ui;

use anyhow::anyhow;
use app::LaunchDashApp;
use clap::Parser;
use cli::Cli;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.json {
        return cli::export_json(&cli);
    }

    let mut state = AppState::default();
    if let Some(path) = &cli.data {
        state.load_path(path);
        if let Some(ds) = &state.dataset {
            let selection = cli.selection(ds);
            state.set_site(selection.site);
            state.set_payload_range(selection.payload_range);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}

mod app;
mod input;
mod style;
mod ui;
mod view;

use app::StagesApp;
use eframe::egui;
use stagenav::config::Config;

fn main() -> eframe::Result<()> {
    let loaded = Config::try_load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    stagenav::logging::init(&config.logging);

    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "Using default configuration");
    }

    if let Err(e) = Config::create_default() {
        tracing::warn!(error = %e, "Could not write default config");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 640.0])
            .with_title("Stages"),
        ..Default::default()
    };

    eframe::run_native(
        "Stages",
        options,
        Box::new(|cc| Ok(Box::new(StagesApp::new(cc, config)))),
    )
}

mod app;
mod commands;
mod sprite;
mod viewport;

use app::ShaperApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shaper_gui=info".into()),
        )
        .init();

    let initial_file = parse_file_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("shaper")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "shaper",
        native_options,
        Box::new(move |cc| Ok(Box::new(ShaperApp::new(cc, initial_file)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// Parse an optional `--file <path>` argument naming a polygon
/// document to open at startup.
fn parse_file_arg() -> Option<std::path::PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--file" && i + 1 < args.len() {
            return Some(std::path::PathBuf::from(&args[i + 1]));
        }
        i += 1;
    }
    None
}

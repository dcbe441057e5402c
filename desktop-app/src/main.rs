#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    // All remote calls are spawned onto this runtime from the UI thread, so
    // it has to outlive the event loop.
    let runtime = tokio::runtime::Runtime::new().expect("Could not start tokio runtime");
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Prepdeck Desktop",
        native_options,
        Box::new(|cc| Ok(Box::new(prepdeck_desktop_app::DesktopApp::new(cc)))),
    )
}

//! Desktop shell for the llore editing core.
//!
//! Hosts one text editor whose undo/redo runs through
//! [`llore_core::HistoryManager`] and whose hover lookups run through
//! [`llore_core::CaretResolver`] backed by egui's text layout.

mod app;

use app::LloreApp;
use eframe::egui;
use llore_core::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("llore=warn,llore_gui=info,llore_core=info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (e.g. from an embedding host) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Start the desktop editor with tracing enabled.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error, including an
/// invalid configuration reported as an app-creation failure.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = Config::from_env();
    config
        .validate()
        .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("llore"),
        ..Default::default()
    };

    eframe::run_native(
        "llore",
        options,
        Box::new(move |cc| Ok(Box::new(LloreApp::new(&cc.egui_ctx, config)))),
    )
}

mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::i18n`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use gmarker_gui_lib::backend;
pub use gmarker_gui_lib::driver;
pub use gmarker_gui_lib::i18n;
pub use gmarker_gui_lib::state;

use app::MarkerApp;
use shared::BoardPayload;

/// Command line overrides
#[derive(Default)]
pub struct CliArgs {
    /// Board read from `--board <file>`; no network load at startup
    pub board: Option<BoardPayload>,
    /// Location from `--url <location>`, instead of the configured start page
    pub location: Option<String>,
    /// Backend root from `GMARKER_BASE_URL`
    pub base_url: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gmarker_gui=info,gmarker_gui_lib=info".into()),
        )
        .init();

    let args = parse_args();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return;
        }
    };
    let handle = runtime.handle().clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("gmarker: Marker Board")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "gmarker-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(MarkerApp::new(cc, handle, args)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        base_url: std::env::var("GMARKER_BASE_URL").ok(),
        ..Default::default()
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--board" if i + 1 < args.len() => {
                cli.board = read_board(&args[i + 1]);
                i += 1;
            }
            "--url" if i + 1 < args.len() => {
                cli.location = Some(args[i + 1].clone());
                i += 1;
            }
            other => tracing::warn!("Ignoring argument {other}"),
        }
        i += 1;
    }
    cli
}

fn read_board(path: &str) -> Option<BoardPayload> {
    match std::fs::read_to_string(path) {
        Ok(json) => match BoardPayload::from_json(&json) {
            Ok(board) => {
                tracing::info!("Loaded board from {path} ({} places)", board.places.len());
                Some(board)
            }
            Err(e) => {
                tracing::error!("Failed to parse board JSON from {path}: {e}");
                None
            }
        },
        Err(e) => {
            tracing::error!("Failed to read board file {path}: {e}");
            None
        }
    }
}

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod media;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::{AdminApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "admin_gui", about = "Admin console for the challenges platform")]
struct Cli {
    /// Base URL of the admin REST API. The CHALLENGE_ADMIN_SERVER_URL
    /// environment variable overrides this when set.
    #[arg(long, default_value = "http://localhost:8080")]
    server_url: String,
    /// Username prefilled on the sign-in screen.
    #[arg(long, default_value = "")]
    username: String,
}

fn resolve_server_url(cli_value: String) -> String {
    match std::env::var("CHALLENGE_ADMIN_SERVER_URL") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => cli_value,
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let startup = StartupConfig {
        server_url: resolve_server_url(cli.server_url),
        username: cli.username,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Challenges Admin Console")
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Challenges Admin Console",
        options,
        Box::new(move |_cc| Ok(Box::new(AdminApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
}

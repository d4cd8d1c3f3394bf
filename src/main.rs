//! Headless sunlight simulation host.
//!
//! Serves the control protocol and keeps the persisted state file current.
//!
//! Usage:
//!   sunlight-sim [--config sim.json] [--port 9743] [--state state.json]

use std::path::PathBuf;
use std::sync::Arc;

use sunlight_control::ControlServer;
use sunlight_sim::core::logging;
use sunlight_sim::sim::{ControlSession, PersistedState, SimulationConfig, SimulationController};

fn main() {
    logging::init();
    log::info!("Sunlight simulation starting...");

    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_path_arg(&args, "--config") {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };
    if let Some(port) = parse_port_arg(&args) {
        config.control_port = port;
    }
    if let Some(path) = parse_path_arg(&args, "--state") {
        config.state_path = Some(path);
    }

    let mut controller = match SimulationController::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = config.state_path.as_deref().filter(|p| p.exists()) {
        match PersistedState::load(path) {
            Ok(saved) => {
                let report = controller.rehydrate(saved);
                if report.is_degraded() {
                    log::warn!("Restored state needed repairs: {:?}", report.clamped_fields);
                }
            }
            Err(e) => log::error!("Ignoring unreadable state file {}: {}", path.display(), e),
        }
    }

    let state = controller.state();
    log::info!(
        "{} ({:.2}, {:.2}, {}) day {} minute {}",
        state.location_name,
        state.location.latitude,
        state.location.longitude,
        state.location.time_zone,
        state.date,
        state.time
    );

    let port = config.control_port;
    let session = ControlSession::new(controller, config.state_path.clone());

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");
    rt.block_on(async {
        let handler = Arc::new(tokio::sync::Mutex::new(session));
        let _server = ControlServer::start(handler, port);
        log::info!("Control server started on port {}", port);
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to wait for shutdown signal: {}", e);
        }
        log::info!("Shutting down");
    });
}

/// Parse a path-valued flag
fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

/// Parse --port / -p
fn parse_port_arg(args: &[String]) -> Option<u16> {
    for i in 0..args.len() {
        if args[i] == "--port" || args[i] == "-p" {
            if let Some(value) = args.get(i + 1) {
                match value.parse() {
                    Ok(port) => return Some(port),
                    Err(_) => log::warn!("Invalid port '{}', using configured port", value),
                }
            }
        }
    }
    None
}

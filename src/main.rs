use std::path::Path;
use std::process::ExitCode;

use log::{error, info};
use raincloud::{AppConfig, Simulation};

const DEFAULT_CONFIG: &str = "config.json";

fn main() -> ExitCode {
    env_logger::init();

    // An explicit path must exist; the default one is optional.
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path).map_err(|e| format!("{}: {}", path, e)),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            AppConfig::load(DEFAULT_CONFIG).map_err(|e| format!("{}: {}", DEFAULT_CONFIG, e))
        }
        None => Ok(AppConfig::default()),
    };

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Loaded config: {:?}", config.window);

    match Simulation::from_config(config).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

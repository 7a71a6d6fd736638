//! Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: "trace", "debug", "info", "warn", "error"; default "info"
//! - LOG_FILE_PATH: when using file mode, the path of the log file
//!   (default "logs/decoder.log"); the UTC date is appended before the
//!   extension so files roll daily

use std::{
    env,
    fs::{create_dir_all, File},
    path::Path,
};

use chrono::Utc;
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};

pub fn setup_logging() {
    let log_mode = env::var("LOG_MODE").unwrap_or_else(|_| "stdout".to_string());
    let level_filter = env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info);

    if log_mode.to_lowercase() == "file" {
        let base_file_path =
            env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/decoder.log".to_string());

        let date_str = Utc::now().format("%Y-%m-%d").to_string();
        let rolled_file_path = if let Some(trimmed) = base_file_path.strip_suffix(".log") {
            format!("{}-{}.log", trimmed, date_str)
        } else {
            format!("{}-{}.log", base_file_path, date_str)
        };

        if let Some(parent) = Path::new(&rolled_file_path).parent() {
            create_dir_all(parent).expect("Failed to create log directory");
        }
        let log_file = File::create(&rolled_file_path)
            .unwrap_or_else(|e| panic!("Unable to create log file {}: {}", rolled_file_path, e));

        WriteLogger::init(level_filter, Config::default(), log_file)
            .expect("Failed to initialize file logger");
    } else {
        SimpleLogger::init(level_filter, Config::default())
            .expect("Failed to initialize simple logger");
    }

    info!("Logging is successfully configured (mode: {})", log_mode);
}

use crate::structs::toml::Output;
use log::{error, LevelFilter};
use simplelog::{Config, SimpleLogger, WriteLogger};
use std::fs::{create_dir_all, File};
use std::path::Path;

/// Logging level based on TOML `Output` configuration
pub(crate) fn log_level(output: &Output) -> LevelFilter {
    if let Some(log_level) = &output.logging {
        match log_level.to_lowercase().as_str() {
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            _ => LevelFilter::Warn,
        }
    } else {
        LevelFilter::Warn
    }
}

/// Start logging to `log_file` if configured, otherwise to the terminal. Only the first call wins
pub(crate) fn setup_logging(output: &Output) {
    let level = log_level(output);
    let path = match &output.log_file {
        Some(result) => result,
        None => {
            let _ = SimpleLogger::init(level, Config::default());
            return;
        }
    };

    if let Some(parent) = Path::new(path).parent() {
        if let Err(err) = create_dir_all(parent) {
            eprintln!("[core] Failed to create log directory for {path}: {err:?}");
        }
    }
    match File::create(path) {
        Ok(log_file) => {
            let _ = WriteLogger::init(level, Config::default(), log_file);
        }
        Err(err) => {
            let _ = SimpleLogger::init(level, Config::default());
            error!("[core] Failed to create log file at {path}. Error: {err:?}");
        }
    }
}

use crate::{
    artifacts::os::windows::tasks::parser::grab_scheduled_tasks, error::TomlError,
    structs::toml::TasksToml, utils::logging::setup_logging,
};
use common::windows::ScheduledTask;
use log::{error, info};
use std::fs::read;

/// Parse a TOML file at provided path and enumerate Schedule Tasks with it
pub fn parse_toml_file(path: &str) -> Result<Vec<ScheduledTask>, TomlError> {
    let buffer = match read(path) {
        Ok(results) => results,
        Err(err) => {
            error!("[core] Could not read TOML file at {path}: {err:?}");
            return Err(TomlError::NoFile);
        }
    };

    parse_toml_data(&buffer)
}

/// Parse an already read TOML file and enumerate Schedule Tasks with it
pub fn parse_toml_data(data: &[u8]) -> Result<Vec<ScheduledTask>, TomlError> {
    let config = TasksToml::parse_tasks_toml(data)?;
    tasks_collection(&config)
}

/// Set up logging then enumerate every task based on the TOML config
fn tasks_collection(config: &TasksToml) -> Result<Vec<ScheduledTask>, TomlError> {
    setup_logging(&config.output);

    match grab_scheduled_tasks(&config.tasks) {
        Ok(result) => {
            info!("[core] Enumerated {} Schedule Tasks", result.len());
            Ok(result)
        }
        Err(err) => {
            error!("[core] Failed to enumerate Schedule Tasks: {err:?}");
            Err(TomlError::Tasks)
        }
    }
}

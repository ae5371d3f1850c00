use crate::{error::TomlError, structs::toml::TasksToml};
use log::error;
use std::str::from_utf8;

impl TasksToml {
    /// Parse the TOML config that drives a Task Scheduler enumeration
    pub(crate) fn parse_tasks_toml(toml_data: &[u8]) -> Result<TasksToml, TomlError> {
        let toml_results = toml::from_str(from_utf8(toml_data).unwrap_or_default());
        let mut config: TasksToml = match toml_results {
            Ok(results) => results,
            Err(err) => {
                error!("[core] Failed to parse TOML data. Error: {err:?}");
                return Err(TomlError::BadToml);
            }
        };

        if let Some(level) = &config.output.logging {
            config.output.logging = Some(level.to_lowercase());
        }
        Ok(config)
    }
}

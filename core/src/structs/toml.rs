use super::artifacts::os::windows::TasksOptions;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TasksToml {
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub tasks: TasksOptions,
}

#[derive(Debug, Default, Deserialize)]
pub struct Output {
    /**One of: warn, error, info, debug. Defaults to warn */
    pub logging: Option<String>,
    /**Write logs to this file instead of the terminal */
    pub log_file: Option<String>,
}

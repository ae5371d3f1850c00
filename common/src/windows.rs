use serde::Serialize;

/// A task registered with the Windows Task Scheduler 2.0 service
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduledTask {
    pub name: String,
    /**Full path in the Task Scheduler folder tree. Unique per enumeration */
    pub path: String,
    pub enabled: bool,
    /**ISO8601 timestamp. Empty if the value could not be read */
    pub last_run_time: String,
    /**ISO8601 timestamp. Empty if the value could not be read */
    pub next_run_time: String,
    /**Only `Exec` actions, in the order the service returns them */
    pub actions: Vec<ExecAction>,
}

/// A `Exec` (start a program) action attached to a `ScheduledTask`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExecAction {
    pub working_directory: String,
    pub path: String,
    /**Raw argument string. Not split */
    pub arguments: String,
}

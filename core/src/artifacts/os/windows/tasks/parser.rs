/**
 * `Schedule Tasks` are a common form of persistence on Windows systems. Instead of parsing the task files
 * on disk we ask the Task Scheduler 2.0 service directly, which also gives us the run time bookkeeping
 * (last and next run) the files do not contain.
 *
 * Only `Exec` actions are returned. Email, message and COM handler actions are skipped.
 *
 * References:
 * `https://learn.microsoft.com/en-us/windows/win32/taskschd/task-scheduler-start-page`
 */
use super::{
    error::TaskError,
    service::DirectoryService,
    walker::{walk_folder, WalkOptions},
};
use crate::structs::artifacts::os::windows::TasksOptions;
use common::windows::ScheduledTask;
use log::{error, info};
use serde_json::Value;

/// Root folder of the Task Scheduler
const ROOT_FOLDER: &str = "\\";

/// Grab Schedule Tasks from the local (or configured remote) Task Scheduler based on `TasksOptions`
#[cfg(target_os = "windows")]
pub fn grab_scheduled_tasks(options: &TasksOptions) -> Result<Vec<ScheduledTask>, TaskError> {
    use super::com::ComTaskService;

    let service = ComTaskService::connect(options)?;
    enumerate_tasks(&service, options)
}

/// Task Scheduler 2.0 only exists on Windows
#[cfg(not(target_os = "windows"))]
pub fn grab_scheduled_tasks(_options: &TasksOptions) -> Result<Vec<ScheduledTask>, TaskError> {
    error!("[tasks] Task Scheduler 2.0 is only available on Windows");
    Err(TaskError::Initialize)
}

/// Walk every task reachable from the configured start folder of `service`
pub fn enumerate_tasks<S: DirectoryService>(
    service: &S,
    options: &TasksOptions,
) -> Result<Vec<ScheduledTask>, TaskError> {
    let path = options.folder.as_deref().unwrap_or(ROOT_FOLDER);
    let folder = match service.folder(path) {
        Ok(result) => result,
        Err(err) => {
            error!("[tasks] Could not get folder {path} in Task Scheduler 2.0: {err:?}");
            return Err(TaskError::ServiceUnavailable);
        }
    };

    let walk_options = WalkOptions {
        include_hidden: options.include_hidden,
        max_depth: options.max_depth,
    };
    let tasks = walk_folder(&folder, &walk_options);
    info!("[tasks] Found {} tasks under {path}", tasks.len());

    Ok(tasks)
}

/// Serialize tasks to JSON
pub fn tasks_json(tasks: &[ScheduledTask]) -> Result<Value, TaskError> {
    match serde_json::to_value(tasks) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[tasks] Failed to serialize tasks: {err:?}");
            Err(TaskError::Serialize)
        }
    }
}

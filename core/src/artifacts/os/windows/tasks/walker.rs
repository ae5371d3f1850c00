/**
 * Walk the Task Scheduler folder tree depth first and project every task into a `ScheduledTask`.
 *
 * Subfolders are visited before the folder's own tasks. Nothing below the starting folder is allowed to
 * fail the walk: an unreadable subfolder, task, action or property only drops or defaults that piece of
 * data. Task definitions on real systems are frequently legacy or partially corrupt.
 */
use super::{
    properties::{read_bool, read_int, read_string, read_timestamp},
    service::{Collection, Definition, Folder, Handle, RegisteredTask},
};
use common::windows::{ExecAction, ScheduledTask};
use log::{debug, warn};

/// `TASK_ACTION_EXEC`. All other action types are ignored
const EXEC_ACTION: i32 = 0;

#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /**Ask the service for hidden tasks too */
    pub include_hidden: bool,
    /**Maximum folder depth below the starting folder. `None` walks everything */
    pub max_depth: Option<usize>,
}

/// Return every task at and below `folder`
pub fn walk_folder<F: Folder>(folder: &F, options: &WalkOptions) -> Vec<ScheduledTask> {
    walk(folder, options, 0)
}

fn walk<F: Folder>(folder: &F, options: &WalkOptions, depth: usize) -> Vec<ScheduledTask> {
    let mut tasks = Vec::new();

    let descend = match options.max_depth {
        Some(max) => depth < max,
        None => true,
    };
    if descend {
        tasks.append(&mut walk_subfolders(folder, options, depth));
    }

    let collection = match folder.tasks(options.include_hidden) {
        Ok(result) => result,
        Err(err) => {
            warn!(
                "[tasks] Could not list tasks in {}: {err:?}",
                folder_path(folder)
            );
            return tasks;
        }
    };
    let count = match collection.count() {
        Ok(result) => result,
        Err(err) => {
            warn!(
                "[tasks] Could not count tasks in {}: {err:?}",
                folder_path(folder)
            );
            return tasks;
        }
    };

    for index in 1..=count {
        let task = match collection.item(index) {
            Ok(result) => result,
            Err(err) => {
                debug!("[tasks] Could not get task {index}: {err:?}");
                continue;
            }
        };
        tasks.push(project_task(&task));
    }

    tasks
}

/// Recurse into each subfolder of `folder`
fn walk_subfolders<F: Folder>(folder: &F, options: &WalkOptions, depth: usize) -> Vec<ScheduledTask> {
    let mut tasks = Vec::new();

    let subfolders = match folder.folders() {
        Ok(result) => result,
        Err(err) => {
            warn!(
                "[tasks] Could not list subfolders of {}: {err:?}",
                folder_path(folder)
            );
            return tasks;
        }
    };
    let count = match subfolders.count() {
        Ok(result) => result,
        Err(err) => {
            warn!(
                "[tasks] Could not count subfolders of {}: {err:?}",
                folder_path(folder)
            );
            return tasks;
        }
    };

    for index in 1..=count {
        let subfolder = match subfolders.item(index) {
            Ok(result) => result,
            Err(err) => {
                debug!("[tasks] Could not open subfolder {index}: {err:?}");
                continue;
            }
        };
        tasks.append(&mut walk(&subfolder, options, depth + 1));
    }

    tasks
}

/// Build a `ScheduledTask`. Every field is read independently and defaults on failure
fn project_task<T: RegisteredTask>(task: &T) -> ScheduledTask {
    let mut info = ScheduledTask {
        name: read_string(task, "name").unwrap_or_default(),
        path: read_string(task, "path").unwrap_or_default(),
        enabled: read_bool(task, "enabled").unwrap_or_default(),
        last_run_time: read_timestamp(task, "lastRunTime").unwrap_or_default(),
        next_run_time: read_timestamp(task, "nextRunTime").unwrap_or_default(),
        actions: Vec::new(),
    };

    let definition = match task.definition() {
        Ok(result) => result,
        Err(err) => {
            debug!("[tasks] Could not get definition for {}: {err:?}", info.path);
            return info;
        }
    };
    info.actions = exec_actions(&definition, &info.path);
    info
}

/// Get the `Exec` actions of a task definition in source order
fn exec_actions<D: Definition>(definition: &D, task_path: &str) -> Vec<ExecAction> {
    let mut actions = Vec::new();

    let collection = match definition.actions() {
        Ok(result) => result,
        Err(err) => {
            debug!("[tasks] Could not get actions for {task_path}: {err:?}");
            return actions;
        }
    };
    let count = match collection.count() {
        Ok(result) => result,
        Err(err) => {
            debug!("[tasks] Could not count actions for {task_path}: {err:?}");
            return actions;
        }
    };

    for index in 1..=count {
        let action = match collection.item(index) {
            Ok(result) => result,
            Err(err) => {
                debug!("[tasks] Could not get action {index} for {task_path}: {err:?}");
                continue;
            }
        };

        match read_int(&action, "type") {
            Ok(EXEC_ACTION) => {}
            Ok(_) => continue,
            Err(err) => {
                debug!("[tasks] Could not get type of action {index} for {task_path}: {err:?}");
                continue;
            }
        }

        actions.push(ExecAction {
            working_directory: read_string(&action, "workingDirectory").unwrap_or_default(),
            path: read_string(&action, "path").unwrap_or_default(),
            arguments: read_string(&action, "arguments").unwrap_or_default(),
        });
    }

    actions
}

fn folder_path<H: Handle>(folder: &H) -> String {
    read_string(folder, "path").unwrap_or_else(|_| String::from("<unknown>"))
}

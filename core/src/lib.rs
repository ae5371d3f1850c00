mod artifacts;
pub mod core;
mod error;
pub mod structs;
mod utils;

pub use artifacts::os::windows::tasks::error::{ServiceError, TaskError};
pub use artifacts::os::windows::tasks::parser::{enumerate_tasks, grab_scheduled_tasks, tasks_json};
pub use artifacts::os::windows::tasks::service::{
    Collection, Definition, DirectoryService, Folder, Handle, PropertyValue, RegisteredTask,
};
pub use artifacts::os::windows::tasks::walker::{walk_folder, WalkOptions};
pub use error::TomlError;
pub use structs::artifacts::os::windows::TasksOptions;

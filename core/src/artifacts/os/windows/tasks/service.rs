/**
 * Capability interface over the Windows Task Scheduler 2.0 object model.
 *
 * The walker only needs a small slice of `ITaskService`: open a folder, list subfolders and tasks by
 * 1-based index, read named properties, and follow `Definition` -> `Actions`. Every handle releases its
 * underlying object when dropped, so early `continue` paths in the walker never leak.
 *
 * References:
 * `https://learn.microsoft.com/en-us/windows/win32/taskschd/task-scheduler-objects`
 */
use super::error::ServiceError;

/// Loosely typed value returned by the Task Scheduler for a property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
    /**OLE Automation date. Days since 1899-12-30 */
    Date(f64),
    Int(i32),
    Empty,
}

/// Any object that exposes named properties
pub trait Handle {
    fn property(&self, name: &str) -> Result<PropertyValue, ServiceError>;
}

/// A 1-based indexed collection of handles
pub trait Collection {
    type Item;

    fn count(&self) -> Result<i32, ServiceError>;
    fn item(&self, index: i32) -> Result<Self::Item, ServiceError>;
}

/// A Task Scheduler folder
pub trait Folder: Handle + Sized {
    type Task: RegisteredTask;
    type Folders: Collection<Item = Self>;
    type Tasks: Collection<Item = Self::Task>;

    fn folders(&self) -> Result<Self::Folders, ServiceError>;
    /**When `include_hidden` is false the service omits tasks flagged as hidden */
    fn tasks(&self, include_hidden: bool) -> Result<Self::Tasks, ServiceError>;
}

/// A task registered in a folder
pub trait RegisteredTask: Handle {
    type Definition: Definition;

    fn definition(&self) -> Result<Self::Definition, ServiceError>;
}

/// The full definition of a task. We only care about the actions
pub trait Definition {
    type Action: Handle;
    type Actions: Collection<Item = Self::Action>;

    fn actions(&self) -> Result<Self::Actions, ServiceError>;
}

/// A connected Task Scheduler session
pub trait DirectoryService {
    type Folder: Folder;

    /**Open a folder by full path. The root folder is `\` */
    fn folder(&self, path: &str) -> Result<Self::Folder, ServiceError>;
}

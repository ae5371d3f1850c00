//! In memory Task Scheduler used by the walker tests. Counts live handles so tests can check every
//! handle the walker acquires is released.
use super::{
    error::ServiceError,
    service::{
        Collection, Definition, DirectoryService, Folder, Handle, PropertyValue, RegisteredTask,
    },
};
use std::{cell::Cell, rc::Rc};

/// `E_ACCESSDENIED`
const ACCESS_DENIED: i32 = 0x80070005_u32 as i32;
/// `E_INVALIDARG`
const INVALID_ARG: i32 = 0x80070057_u32 as i32;

fn leaf_name(path: &str) -> String {
    path.rsplit('\\').next().unwrap_or_default().to_string()
}

#[derive(Default)]
pub(crate) struct FakeNode {
    path: String,
    folders: Vec<Rc<FakeNode>>,
    tasks: Vec<Rc<FakeTask>>,
    fail_open: bool,
    fail_folders: bool,
}

impl FakeNode {
    pub(crate) fn new(path: &str) -> FakeNode {
        FakeNode {
            path: path.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn folder(mut self, node: FakeNode) -> FakeNode {
        self.folders.push(Rc::new(node));
        self
    }

    pub(crate) fn task(mut self, task: FakeTask) -> FakeNode {
        self.tasks.push(Rc::new(task));
        self
    }

    /// Opening this folder by index fails
    pub(crate) fn fail_open(mut self) -> FakeNode {
        self.fail_open = true;
        self
    }

    /// Listing this folder's subfolders fails
    pub(crate) fn fail_folders(mut self) -> FakeNode {
        self.fail_folders = true;
        self
    }

    fn find(node: &Rc<FakeNode>, path: &str) -> Option<Rc<FakeNode>> {
        if node.path == path {
            return Some(node.clone());
        }
        node.folders
            .iter()
            .find_map(|child| FakeNode::find(child, path))
    }
}

pub(crate) struct FakeTask {
    path: String,
    last_run: f64,
    next_run: f64,
    hidden: bool,
    fail_fetch: bool,
    fail_definition: bool,
    failing: Vec<String>,
    actions: Vec<Rc<FakeAction>>,
}

impl FakeTask {
    pub(crate) fn new(path: &str) -> FakeTask {
        FakeTask {
            path: path.to_string(),
            last_run: 0.0,
            next_run: 0.0,
            hidden: false,
            fail_fetch: false,
            fail_definition: false,
            failing: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub(crate) fn next_run(mut self, date: f64) -> FakeTask {
        self.next_run = date;
        self
    }

    pub(crate) fn hidden(mut self) -> FakeTask {
        self.hidden = true;
        self
    }

    pub(crate) fn fail_fetch(mut self) -> FakeTask {
        self.fail_fetch = true;
        self
    }

    pub(crate) fn fail_definition(mut self) -> FakeTask {
        self.fail_definition = true;
        self
    }

    pub(crate) fn fail_property(mut self, name: &str) -> FakeTask {
        self.failing.push(name.to_string());
        self
    }

    pub(crate) fn action(mut self, action: FakeAction) -> FakeTask {
        self.actions.push(Rc::new(action));
        self
    }
}

pub(crate) struct FakeAction {
    action_type: i32,
    working_directory: String,
    path: String,
    arguments: String,
    fail_fetch: bool,
    failing: Vec<String>,
}

impl FakeAction {
    pub(crate) fn exec(working_directory: &str, path: &str, arguments: &str) -> FakeAction {
        FakeAction {
            action_type: 0,
            working_directory: working_directory.to_string(),
            path: path.to_string(),
            arguments: arguments.to_string(),
            fail_fetch: false,
            failing: Vec::new(),
        }
    }

    /// A non `Exec` action such as `SendEmail` (6) or `ShowMessage` (7)
    pub(crate) fn other(action_type: i32) -> FakeAction {
        FakeAction {
            action_type,
            ..FakeAction::exec("", "", "")
        }
    }

    pub(crate) fn fail_fetch(mut self) -> FakeAction {
        self.fail_fetch = true;
        self
    }

    pub(crate) fn fail_property(mut self, name: &str) -> FakeAction {
        self.failing.push(name.to_string());
        self
    }
}

/// Increments the live handle count on creation and decrements it on drop
struct Tracker {
    live: Rc<Cell<i64>>,
}

impl Tracker {
    fn new(live: &Rc<Cell<i64>>) -> Tracker {
        live.set(live.get() + 1);
        Tracker { live: live.clone() }
    }
}

impl Drop for Tracker {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub(crate) struct FakeService {
    root: Rc<FakeNode>,
    live: Rc<Cell<i64>>,
}

impl FakeService {
    pub(crate) fn new(root: FakeNode) -> FakeService {
        FakeService {
            root: Rc::new(root),
            live: Rc::new(Cell::new(0)),
        }
    }

    /// Number of handles currently open
    pub(crate) fn live_handles(&self) -> i64 {
        self.live.get()
    }
}

impl DirectoryService for FakeService {
    type Folder = FakeFolder;

    fn folder(&self, path: &str) -> Result<FakeFolder, ServiceError> {
        match FakeNode::find(&self.root, path) {
            Some(node) => Ok(FakeFolder::open(node, &self.live)),
            None => Err(ServiceError::Call(INVALID_ARG)),
        }
    }
}

pub(crate) struct FakeFolder {
    node: Rc<FakeNode>,
    live: Rc<Cell<i64>>,
    _tracker: Tracker,
}

impl FakeFolder {
    fn open(node: Rc<FakeNode>, live: &Rc<Cell<i64>>) -> FakeFolder {
        FakeFolder {
            node,
            live: live.clone(),
            _tracker: Tracker::new(live),
        }
    }

    /// Open the first task (hidden or not) in the root folder
    pub(crate) fn first_task(service: &FakeService) -> FakeTaskHandle {
        let root = FakeFolder::open(service.root.clone(), &service.live);
        let tasks = root.tasks(true).unwrap();
        tasks.item(1).unwrap()
    }
}

impl Handle for FakeFolder {
    fn property(&self, name: &str) -> Result<PropertyValue, ServiceError> {
        match name {
            "name" => Ok(PropertyValue::Text(leaf_name(&self.node.path))),
            "path" => Ok(PropertyValue::Text(self.node.path.clone())),
            _ => Err(ServiceError::UnknownProperty),
        }
    }
}

impl Folder for FakeFolder {
    type Task = FakeTaskHandle;
    type Folders = FakeFolders;
    type Tasks = FakeTasks;

    fn folders(&self) -> Result<FakeFolders, ServiceError> {
        if self.node.fail_folders {
            return Err(ServiceError::Call(ACCESS_DENIED));
        }
        Ok(FakeFolders {
            items: self.node.folders.clone(),
            live: self.live.clone(),
            _tracker: Tracker::new(&self.live),
        })
    }

    fn tasks(&self, include_hidden: bool) -> Result<FakeTasks, ServiceError> {
        let items = self
            .node
            .tasks
            .iter()
            .filter(|task| include_hidden || !task.hidden)
            .cloned()
            .collect();
        Ok(FakeTasks {
            items,
            live: self.live.clone(),
            _tracker: Tracker::new(&self.live),
        })
    }
}

pub(crate) struct FakeFolders {
    items: Vec<Rc<FakeNode>>,
    live: Rc<Cell<i64>>,
    _tracker: Tracker,
}

impl Collection for FakeFolders {
    type Item = FakeFolder;

    fn count(&self) -> Result<i32, ServiceError> {
        Ok(self.items.len() as i32)
    }

    fn item(&self, index: i32) -> Result<FakeFolder, ServiceError> {
        let node = lookup(&self.items, index)?;
        if node.fail_open {
            return Err(ServiceError::Call(ACCESS_DENIED));
        }
        Ok(FakeFolder::open(node, &self.live))
    }
}

pub(crate) struct FakeTasks {
    items: Vec<Rc<FakeTask>>,
    live: Rc<Cell<i64>>,
    _tracker: Tracker,
}

impl Collection for FakeTasks {
    type Item = FakeTaskHandle;

    fn count(&self) -> Result<i32, ServiceError> {
        Ok(self.items.len() as i32)
    }

    fn item(&self, index: i32) -> Result<FakeTaskHandle, ServiceError> {
        let task = lookup(&self.items, index)?;
        if task.fail_fetch {
            return Err(ServiceError::Call(ACCESS_DENIED));
        }
        Ok(FakeTaskHandle {
            task,
            live: self.live.clone(),
            _tracker: Tracker::new(&self.live),
        })
    }
}

pub(crate) struct FakeTaskHandle {
    task: Rc<FakeTask>,
    live: Rc<Cell<i64>>,
    _tracker: Tracker,
}

impl Handle for FakeTaskHandle {
    fn property(&self, name: &str) -> Result<PropertyValue, ServiceError> {
        if self.task.failing.iter().any(|failing| failing == name) {
            return Err(ServiceError::Call(ACCESS_DENIED));
        }
        match name {
            "name" => Ok(PropertyValue::Text(leaf_name(&self.task.path))),
            "path" => Ok(PropertyValue::Text(self.task.path.clone())),
            "enabled" => Ok(PropertyValue::Bool(true)),
            "lastRunTime" => Ok(PropertyValue::Date(self.task.last_run)),
            "nextRunTime" => Ok(PropertyValue::Date(self.task.next_run)),
            _ => Err(ServiceError::UnknownProperty),
        }
    }
}

impl RegisteredTask for FakeTaskHandle {
    type Definition = FakeDefinition;

    fn definition(&self) -> Result<FakeDefinition, ServiceError> {
        if self.task.fail_definition {
            return Err(ServiceError::Call(ACCESS_DENIED));
        }
        Ok(FakeDefinition {
            task: self.task.clone(),
            live: self.live.clone(),
            _tracker: Tracker::new(&self.live),
        })
    }
}

pub(crate) struct FakeDefinition {
    task: Rc<FakeTask>,
    live: Rc<Cell<i64>>,
    _tracker: Tracker,
}

impl Definition for FakeDefinition {
    type Action = FakeActionHandle;
    type Actions = FakeActions;

    fn actions(&self) -> Result<FakeActions, ServiceError> {
        Ok(FakeActions {
            items: self.task.actions.clone(),
            live: self.live.clone(),
            _tracker: Tracker::new(&self.live),
        })
    }
}

pub(crate) struct FakeActions {
    items: Vec<Rc<FakeAction>>,
    live: Rc<Cell<i64>>,
    _tracker: Tracker,
}

impl Collection for FakeActions {
    type Item = FakeActionHandle;

    fn count(&self) -> Result<i32, ServiceError> {
        Ok(self.items.len() as i32)
    }

    fn item(&self, index: i32) -> Result<FakeActionHandle, ServiceError> {
        let action = lookup(&self.items, index)?;
        if action.fail_fetch {
            return Err(ServiceError::Call(ACCESS_DENIED));
        }
        Ok(FakeActionHandle {
            action,
            _tracker: Tracker::new(&self.live),
        })
    }
}

pub(crate) struct FakeActionHandle {
    action: Rc<FakeAction>,
    _tracker: Tracker,
}

impl Handle for FakeActionHandle {
    fn property(&self, name: &str) -> Result<PropertyValue, ServiceError> {
        if self.action.failing.iter().any(|failing| failing == name) {
            return Err(ServiceError::Call(ACCESS_DENIED));
        }
        match name {
            "type" => Ok(PropertyValue::Int(self.action.action_type)),
            "workingDirectory" => Ok(PropertyValue::Text(self.action.working_directory.clone())),
            "path" => Ok(PropertyValue::Text(self.action.path.clone())),
            "arguments" => Ok(PropertyValue::Text(self.action.arguments.clone())),
            _ => Err(ServiceError::UnknownProperty),
        }
    }
}

/// 1-based lookup, same as the Task Scheduler collections
fn lookup<T>(items: &[Rc<T>], index: i32) -> Result<Rc<T>, ServiceError> {
    if index < 1 {
        return Err(ServiceError::Call(INVALID_ARG));
    }
    match items.get((index - 1) as usize) {
        Some(item) => Ok(item.clone()),
        None => Err(ServiceError::Call(INVALID_ARG)),
    }
}

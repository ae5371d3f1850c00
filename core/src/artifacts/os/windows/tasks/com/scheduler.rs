/**
 * Task Scheduler 2.0 over COM.
 *
 * Every handle keeps a reference to the `ComSession` so COM stays initialized until the last interface
 * pointer has been released, no matter which order the caller drops things in.
 *
 * References:
 * `https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itaskservice`
 */
use super::{
    session::{ComPtr, ComSession},
    variant::{int_variant, read_bstr, string_variant, Bstr},
};
use crate::{
    artifacts::os::windows::tasks::{
        error::{ServiceError, TaskError},
        service::{
            Collection, Definition, DirectoryService, Folder, Handle, PropertyValue,
            RegisteredTask,
        },
    },
    structs::artifacts::os::windows::TasksOptions,
};
use log::error;
use std::{ptr::null_mut, rc::Rc};
use winapi::{
    ctypes::c_void,
    shared::{
        guiddef::GUID,
        wtypes::{VARIANT_BOOL, VARIANT_FALSE},
        wtypesbase::CLSCTX_INPROC_SERVER,
    },
    um::{
        combaseapi::CoCreateInstance,
        taskschd::{
            IAction, IActionCollection, IExecAction, IRegisteredTask, IRegisteredTaskCollection,
            ITaskDefinition, ITaskFolder, ITaskFolderCollection, ITaskService,
        },
    },
    Interface,
};

/// `CLSID_TaskScheduler` {0F87369F-A4E5-4CFC-BD3E-73E6154572DD}
const CLSID_TASK_SCHEDULER: GUID = GUID {
    Data1: 0x0f87369f,
    Data2: 0xa4e5,
    Data3: 0x4cfc,
    Data4: [0xbd, 0x3e, 0x73, 0xe6, 0x15, 0x45, 0x72, 0xdd],
};

/// `TASK_ENUM_HIDDEN`
const ENUM_HIDDEN: i32 = 0x1;

/// A connected `ITaskService`
pub(crate) struct ComTaskService {
    service: ComPtr<ITaskService>,
    session: Rc<ComSession>,
}

impl ComTaskService {
    /// Initialize COM, create the Task Scheduler object and connect to it
    pub(crate) fn connect(options: &TasksOptions) -> Result<ComTaskService, TaskError> {
        let session = match ComSession::initialize() {
            Ok(result) => Rc::new(result),
            Err(status) => {
                error!("[tasks] Could not initialize Windows COM API: {status:#x}");
                return Err(TaskError::Initialize);
            }
        };

        let service_result = ComPtr::<ITaskService>::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                CoCreateInstance(
                    &CLSID_TASK_SCHEDULER,
                    null_mut(),
                    CLSCTX_INPROC_SERVER,
                    &ITaskService::uuidof(),
                    out.cast::<*mut c_void>(),
                )
            }
        });
        let service = match service_result {
            Ok(result) => result,
            Err(err) => {
                error!("[tasks] Could not create Task Scheduler 2.0 object: {err:?}");
                return Err(TaskError::ServiceUnavailable);
            }
        };

        let server = Bstr::new(options.server.as_deref().unwrap_or_default());
        let user = Bstr::new(options.user.as_deref().unwrap_or_default());
        let domain = Bstr::new(options.domain.as_deref().unwrap_or_default());
        let password = Bstr::new(options.password.as_deref().unwrap_or_default());

        #[allow(unsafe_code)]
        let status = unsafe {
            service.Connect(
                string_variant(&server),
                string_variant(&user),
                string_variant(&domain),
                string_variant(&password),
            )
        };
        if status < 0 {
            error!("[tasks] Could not connect to Task Scheduler 2.0: {status:#x}");
            return Err(TaskError::Connection);
        }

        Ok(ComTaskService { service, session })
    }
}

impl DirectoryService for ComTaskService {
    type Folder = ComFolder;

    fn folder(&self, path: &str) -> Result<ComFolder, ServiceError> {
        let path = Bstr::new(path);
        let folder = ComPtr::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                self.service.GetFolder(path.as_raw(), out)
            }
        })?;
        Ok(ComFolder {
            folder,
            session: self.session.clone(),
        })
    }
}

pub(crate) struct ComFolder {
    folder: ComPtr<ITaskFolder>,
    session: Rc<ComSession>,
}

impl Handle for ComFolder {
    #[allow(unsafe_code)]
    fn property(&self, name: &str) -> Result<PropertyValue, ServiceError> {
        let value = match name {
            "name" => read_bstr(|out| unsafe { self.folder.get_Name(out) })?,
            "path" => read_bstr(|out| unsafe { self.folder.get_Path(out) })?,
            _ => return Err(ServiceError::UnknownProperty),
        };
        Ok(PropertyValue::Text(value))
    }
}

impl Folder for ComFolder {
    type Task = ComTask;
    type Folders = ComFolders;
    type Tasks = ComTasks;

    fn folders(&self) -> Result<ComFolders, ServiceError> {
        let folders = ComPtr::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                self.folder.GetFolders(0, out)
            }
        })?;
        Ok(ComFolders {
            folders,
            session: self.session.clone(),
        })
    }

    fn tasks(&self, include_hidden: bool) -> Result<ComTasks, ServiceError> {
        let flags = if include_hidden { ENUM_HIDDEN } else { 0 };
        let tasks = ComPtr::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                self.folder.GetTasks(flags, out)
            }
        })?;
        Ok(ComTasks {
            tasks,
            session: self.session.clone(),
        })
    }
}

pub(crate) struct ComFolders {
    folders: ComPtr<ITaskFolderCollection>,
    session: Rc<ComSession>,
}

impl Collection for ComFolders {
    type Item = ComFolder;

    fn count(&self) -> Result<i32, ServiceError> {
        let mut count = 0;
        #[allow(unsafe_code)]
        let status = unsafe { self.folders.get_Count(&mut count) };
        check(status)?;
        Ok(count)
    }

    fn item(&self, index: i32) -> Result<ComFolder, ServiceError> {
        let folder = ComPtr::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                self.folders.get_Item(int_variant(index), out)
            }
        })?;
        Ok(ComFolder {
            folder,
            session: self.session.clone(),
        })
    }
}

pub(crate) struct ComTasks {
    tasks: ComPtr<IRegisteredTaskCollection>,
    session: Rc<ComSession>,
}

impl Collection for ComTasks {
    type Item = ComTask;

    fn count(&self) -> Result<i32, ServiceError> {
        let mut count = 0;
        #[allow(unsafe_code)]
        let status = unsafe { self.tasks.get_Count(&mut count) };
        check(status)?;
        Ok(count)
    }

    fn item(&self, index: i32) -> Result<ComTask, ServiceError> {
        let task = ComPtr::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                self.tasks.get_Item(int_variant(index), out)
            }
        })?;
        Ok(ComTask {
            task,
            session: self.session.clone(),
        })
    }
}

pub(crate) struct ComTask {
    task: ComPtr<IRegisteredTask>,
    session: Rc<ComSession>,
}

impl Handle for ComTask {
    #[allow(unsafe_code)]
    fn property(&self, name: &str) -> Result<PropertyValue, ServiceError> {
        let value = match name {
            "name" => PropertyValue::Text(read_bstr(|out| unsafe { self.task.get_Name(out) })?),
            "path" => PropertyValue::Text(read_bstr(|out| unsafe { self.task.get_Path(out) })?),
            "enabled" => {
                let mut enabled: VARIANT_BOOL = VARIANT_FALSE;
                check(unsafe { self.task.get_Enabled(&mut enabled) })?;
                PropertyValue::Bool(enabled != VARIANT_FALSE)
            }
            "lastRunTime" => {
                let mut date = 0.0;
                check(unsafe { self.task.get_LastRunTime(&mut date) })?;
                PropertyValue::Date(date)
            }
            "nextRunTime" => {
                let mut date = 0.0;
                check(unsafe { self.task.get_NextRunTime(&mut date) })?;
                PropertyValue::Date(date)
            }
            _ => return Err(ServiceError::UnknownProperty),
        };
        Ok(value)
    }
}

impl RegisteredTask for ComTask {
    type Definition = ComDefinition;

    fn definition(&self) -> Result<ComDefinition, ServiceError> {
        let definition = ComPtr::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                self.task.get_Definition(out)
            }
        })?;
        Ok(ComDefinition {
            definition,
            session: self.session.clone(),
        })
    }
}

pub(crate) struct ComDefinition {
    definition: ComPtr<ITaskDefinition>,
    session: Rc<ComSession>,
}

impl Definition for ComDefinition {
    type Action = ComAction;
    type Actions = ComActions;

    fn actions(&self) -> Result<ComActions, ServiceError> {
        let actions = ComPtr::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                self.definition.get_Actions(out)
            }
        })?;
        Ok(ComActions {
            actions,
            session: self.session.clone(),
        })
    }
}

pub(crate) struct ComActions {
    actions: ComPtr<IActionCollection>,
    session: Rc<ComSession>,
}

impl Collection for ComActions {
    type Item = ComAction;

    fn count(&self) -> Result<i32, ServiceError> {
        let mut count = 0;
        #[allow(unsafe_code)]
        let status = unsafe { self.actions.get_Count(&mut count) };
        check(status)?;
        Ok(count)
    }

    fn item(&self, index: i32) -> Result<ComAction, ServiceError> {
        let action = ComPtr::from_call(|out| {
            #[allow(unsafe_code)]
            unsafe {
                self.actions.get_Item(index, out)
            }
        })?;
        Ok(ComAction {
            action,
            _session: self.session.clone(),
        })
    }
}

pub(crate) struct ComAction {
    action: ComPtr<IAction>,
    _session: Rc<ComSession>,
}

impl Handle for ComAction {
    #[allow(unsafe_code)]
    fn property(&self, name: &str) -> Result<PropertyValue, ServiceError> {
        if name == "type" {
            let mut action_type = 0;
            check(unsafe { self.action.get_Type(&mut action_type) })?;
            return Ok(PropertyValue::Int(action_type as i32));
        }

        // Only Exec actions expose these
        let exec = self.action.cast::<IExecAction>()?;
        let value = match name {
            "workingDirectory" => read_bstr(|out| unsafe { exec.get_WorkingDirectory(out) })?,
            "path" => read_bstr(|out| unsafe { exec.get_Path(out) })?,
            "arguments" => read_bstr(|out| unsafe { exec.get_Arguments(out) })?,
            _ => return Err(ServiceError::UnknownProperty),
        };
        Ok(PropertyValue::Text(value))
    }
}

fn check(status: i32) -> Result<(), ServiceError> {
    if status < 0 {
        return Err(ServiceError::Call(status));
    }
    Ok(())
}
